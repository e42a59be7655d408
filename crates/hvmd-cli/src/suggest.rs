//! Nearest-command hints for rejected input.

/// Known misspellings per canonical command, in match priority order.
const TYPOS: &[(&str, &[&str])] = &[
    ("help", &["hlep", "halp", "hel", "hepl", "h", "-h", "--help"]),
    ("ping", &["pong", "pign", "pin", "p"]),
    (
        "admins",
        &["admin", "admn", "adm", "administrators", "users"],
    ),
];

/// Suggest a public command for `input`.
///
/// Input containing `core` never gets a hint. Matching is a lower-cased
/// substring test in either direction; the first table entry wins.
pub(crate) fn suggest(input: &str) -> Option<&'static str> {
    if input.contains("core") {
        return None;
    }

    let input = input.to_lowercase();
    TYPOS
        .iter()
        .find(|(_, typos)| {
            typos
                .iter()
                .any(|typo| input.contains(typo) || typo.contains(input.as_str()))
        })
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Classification, classify};

    #[test]
    fn common_typos_map_to_commands() {
        assert_eq!(suggest("pign"), Some("ping"));
        assert_eq!(suggest("pong"), Some("ping"));
        assert_eq!(suggest("hlep"), Some("help"));
        assert_eq!(suggest("--help"), Some("help"));
        assert_eq!(suggest("-h"), Some("help"));
        assert_eq!(suggest("admn"), Some("admins"));
        assert_eq!(suggest("USERS"), Some("admins"));
        assert_eq!(suggest("administrator"), Some("admins"));
    }

    #[test]
    fn first_entry_wins_on_overlap() {
        // matches both the `h` help typo and the `p` ping typo
        assert_eq!(suggest("hp"), Some("help"));
        assert_eq!(suggest("whoami"), Some("help"));
    }

    #[test]
    fn core_substring_suppresses_hints() {
        assert_eq!(suggest("--core"), None);
        assert_eq!(suggest("corehelp"), None);
        assert_eq!(suggest("pingcore"), None);
        // the check runs on raw input before lower-casing
        assert_eq!(suggest("COREping"), Some("ping"));
    }

    #[test]
    fn unrelated_input_has_no_hint() {
        assert_eq!(suggest("identify"), None);
        assert_eq!(suggest("zzz"), None);
    }

    #[test]
    fn suggestions_are_public_commands() {
        for (name, _) in TYPOS {
            assert_eq!(classify(name), Classification::Public);
        }
    }
}
