// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template version ordering.

use std::cmp::Ordering;

/// Compares two version strings numerically.
///
/// Well-formed semantic versions use semver precedence. Anything looser
/// (`1.2`, `v3`, `1.2.3.4`) is compared component by component, with
/// missing components read as zero. Strings are never compared
/// lexicographically, so `1.2.0 < 1.10.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = (strip_prefix(a), strip_prefix(b));
    if let (Ok(va), Ok(vb)) = (semver::Version::parse(a), semver::Version::parse(b)) {
        return va.cmp_precedence(&vb);
    }

    let (pa, pb) = (components(a), components(b));
    let len = pa.len().max(pb.len()).max(3);
    (0..len)
        .map(|i| {
            let x = pa.get(i).copied().unwrap_or(0);
            let y = pb.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn strip_prefix(v: &str) -> &str {
    let v = v.trim();
    v.strip_prefix('v').or_else(|| v.strip_prefix('V')).unwrap_or(v)
}

/// Numeric prefix of each dot-separated component; pre-release and build
/// suffixes are dropped.
fn components(v: &str) -> Vec<u64> {
    let core = v.split(['-', '+']).next().unwrap_or("");
    core.split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(compare_versions("1.2.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.2.0"), Ordering::Greater);
        assert_eq!(compare_versions("10.0.0", "9.9.9"), Ordering::Greater);
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("2", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("", "0.0.0"), Ordering::Equal);
    }

    #[test]
    fn leading_v_is_ignored() {
        assert_eq!(compare_versions("v1.4.0", "1.4.0"), Ordering::Equal);
    }

    #[test]
    fn prerelease_sorts_before_release() {
        assert_eq!(compare_versions("1.0.0-beta", "1.0.0"), Ordering::Less);
    }

    #[test]
    fn extra_components_count() {
        assert_eq!(compare_versions("1.2.3.1", "1.2.3"), Ordering::Greater);
    }

    proptest! {
        #[test]
        fn matches_tuple_ordering(
            a in (0u64..1000, 0u64..1000, 0u64..1000),
            b in (0u64..1000, 0u64..1000, 0u64..1000),
        ) {
            let va = format!("{}.{}.{}", a.0, a.1, a.2);
            let vb = format!("{}.{}.{}", b.0, b.1, b.2);
            prop_assert_eq!(compare_versions(&va, &vb), a.cmp(&b));
        }

        #[test]
        fn antisymmetric(a in "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}", b in "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}") {
            prop_assert_eq!(compare_versions(&a, &b), compare_versions(&b, &a).reverse());
        }
    }
}
