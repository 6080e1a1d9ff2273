// Copyright 2026 PRAGMA
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Primitive field validators. Pure predicates and parsers with no side
//! effects: callers translate failures into their own typed errors.

pub const POLICY_ID_LENGTH: usize = 56;

pub const ASSET_NAME_MAX_LENGTH: usize = 64;

/// An optional leading `+`, then one or more digits.
pub fn is_nonnegative_integer(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// An asset name: up to 64 hex characters; the empty string (also spelled
/// `"\x"`) names the unnamed asset.
pub fn is_valid_token_name(s: &str) -> bool {
    s == rosetta_kernel::EMPTY_SYMBOL
        || (s.len() <= ASSET_NAME_MAX_LENGTH && s.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// A policy id: exactly 56 hex characters.
pub fn is_valid_policy_id(s: &str) -> bool {
    s.len() == POLICY_ID_LENGTH && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A TCP port, as a decimal string.
pub fn is_valid_port(s: &str) -> bool {
    is_nonnegative_integer(s) && s.trim_start_matches('+').parse::<u16>().is_ok()
}

/// Parse an amount that must be non-negative (outputs, token quantities).
pub fn parse_nonnegative_amount(s: &str) -> Option<u64> {
    if !is_nonnegative_integer(s) {
        return None;
    }
    s.strip_prefix('+').unwrap_or(s).parse().ok()
}

/// Parse an amount that must be strictly negative (inputs, withdrawals),
/// returning its magnitude.
pub fn parse_negative_amount(s: &str) -> Option<u64> {
    let digits = s.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude: u64 = digits.parse().ok()?;
    (magnitude > 0).then_some(magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0", true ; "zero")]
    #[test_case("+12345", true ; "plus prefixed")]
    #[test_case("12345", true ; "plain digits")]
    #[test_case("-1", false ; "negative")]
    #[test_case("", false ; "empty")]
    #[test_case("+", false ; "lone plus")]
    #[test_case("12a", false ; "trailing letter")]
    fn nonnegative_integer(s: &str, expected: bool) {
        assert_eq!(is_nonnegative_integer(s), expected);
    }

    #[test_case("", true ; "empty name")]
    #[test_case("\\x", true ; "empty name marker")]
    #[test_case("cafe", true)]
    #[test_case("CAFE00", true)]
    #[test_case("xyz", false ; "not hex")]
    fn token_name(s: &str, expected: bool) {
        assert_eq!(is_valid_token_name(s), expected);
    }

    #[test]
    fn token_name_length_boundary() {
        assert!(is_valid_token_name(&"a".repeat(64)));
        assert!(!is_valid_token_name(&"a".repeat(65)));
    }

    #[test]
    fn policy_id_length_boundary() {
        assert!(is_valid_policy_id(&"b".repeat(56)));
        assert!(!is_valid_policy_id(&"b".repeat(55)));
        assert!(!is_valid_policy_id(&"g".repeat(56)));
    }

    #[test_case("3001", true)]
    #[test_case("0", true)]
    #[test_case("65536", false ; "above u16")]
    #[test_case("-1", false)]
    #[test_case("http", false)]
    fn port(s: &str, expected: bool) {
        assert_eq!(is_valid_port(s), expected);
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_nonnegative_amount("90000"), Some(90000));
        assert_eq!(parse_nonnegative_amount("0"), Some(0));
        assert_eq!(parse_nonnegative_amount("-5"), None);
        assert_eq!(parse_negative_amount("-90000"), Some(90000));
        assert_eq!(parse_negative_amount("-0"), None);
        assert_eq!(parse_negative_amount("90000"), None);
        assert_eq!(parse_negative_amount("-12a"), None);
    }
}
