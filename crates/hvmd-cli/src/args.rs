//! Normalisation of the raw argument vector into an invocation request.

/// Trailing token that requests elevated trust.
pub(crate) const ELEVATION_MARKER: &str = "--core";

/// A command invocation derived from the raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InvocationRequest {
    pub(crate) raw_args: Vec<String>,
    pub(crate) command: String,
    pub(crate) positional: Vec<String>,
    pub(crate) elevation_requested: bool,
}

impl InvocationRequest {
    /// Parse `raw_args` (program name excluded).
    ///
    /// Elevation is requested only when the marker is the final token; a
    /// marker anywhere else stays ordinary input. Returns `None` when no
    /// command remains after stripping the marker.
    pub(crate) fn parse(raw_args: Vec<String>) -> Option<Self> {
        let elevation_requested = raw_args
            .last()
            .is_some_and(|last| last == ELEVATION_MARKER);

        let kept = if elevation_requested {
            raw_args.len() - 1
        } else {
            raw_args.len()
        };
        let mut filtered = raw_args[..kept].iter().cloned();
        let command = filtered.next()?;
        let positional = filtered.collect();

        Some(Self {
            raw_args,
            command,
            positional,
            elevation_requested,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn trailing_marker_requests_elevation() {
        let request = InvocationRequest::parse(args(&["identify", "--core"])).expect("command");
        assert!(request.elevation_requested);
        assert_eq!(request.command, "identify");
        assert!(request.positional.is_empty());
        assert_eq!(request.raw_args, args(&["identify", "--core"]));
    }

    #[test]
    fn marker_elsewhere_is_ordinary_input() {
        let cases: &[&[&str]] = &[
            &["--core", "foo"],
            &["identify", "--core", "extra"],
            &["ping", "--core", "--core", "x"],
            &["help"],
            &["ping", "--Core"],
        ];
        for case in cases {
            let request = InvocationRequest::parse(args(case)).expect("command");
            assert!(!request.elevation_requested, "{case:?}");
            assert_eq!(request.command, case[0], "{case:?}");
            assert_eq!(request.positional, args(&case[1..]), "{case:?}");
        }
    }

    #[test]
    fn only_the_final_marker_is_stripped() {
        let request =
            InvocationRequest::parse(args(&["--core", "extra", "--core"])).expect("command");
        assert!(request.elevation_requested);
        assert_eq!(request.command, "--core");
        assert_eq!(request.positional, args(&["extra"]));

        let request = InvocationRequest::parse(args(&["cmd", "extra", "--core"])).expect("command");
        assert!(request.elevation_requested);
        assert_eq!(request.command, "cmd");
        assert_eq!(request.positional, args(&["extra"]));
    }

    #[test]
    fn empty_input_has_no_command() {
        assert_eq!(InvocationRequest::parse(Vec::new()), None);
        assert_eq!(InvocationRequest::parse(args(&["--core"])), None);
    }
}
