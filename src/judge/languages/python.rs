//! Python harness

use std::sync::LazyLock;

use regex::Regex;

use super::HarnessLiterals;

static ENTRY_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("entry point pattern is valid")
});

/// Find the first top-level `def` in the submission
pub fn detect_entry_point(code: &str) -> Option<String> {
    ENTRY_POINT
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

const TEMPLATE: &str = r#"import json
import sys

__marker = @MARKER@
__source = @SOURCE@
__entry = @ENTRY@
__args = json.loads(@ARGS@)


def __emit(report):
    try:
        line = json.dumps(report, allow_nan=False)
    except (TypeError, ValueError) as e:
        line = json.dumps({"status": "runtime_error", "message": "Result is not JSON serialisable: %s" % e})
    sys.stdout.write("\n" + __marker + line + "\n")
    sys.stdout.flush()


try:
    __code = compile(__source, "<submission>", "exec")
except (SyntaxError, ValueError) as e:
    __emit({"status": "syntax_error", "message": "%s: %s" % (type(e).__name__, e)})
    sys.exit(0)

__namespace = {"__name__": "submission"}
try:
    exec(__code, __namespace)
    __fn = __namespace.get(__entry)
    if not callable(__fn):
        raise NameError("Entry point '%s' is not a function" % __entry)
    __value = __fn(*__args)
    __emit({"status": "ok", "value": __value})
except BaseException as e:
    __emit({"status": "runtime_error", "message": "%s: %s" % (type(e).__name__, e)})
"#;

/// Render the Python harness
pub fn harness(literals: &HarnessLiterals) -> String {
    literals.render(TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_top_level_def() {
        let code = "import math\n\ndef area(r):\n    return math.pi * r * r\n";
        assert_eq!(detect_entry_point(code), Some("area".to_string()));
    }

    #[test]
    fn test_ignores_nested_def() {
        let code = "class S:\n    def inner(self):\n        pass\n";
        assert_eq!(detect_entry_point(code), None);
    }

    #[test]
    fn test_results_are_strict_json() {
        // NaN and Infinity must reach the runtime_error branch
        assert!(TEMPLATE.contains("json.dumps(report, allow_nan=False)"));
    }
}
