//! JavaScript (Node.js) harness

use std::sync::LazyLock;

use regex::Regex;

use super::HarnessLiterals;

/// `function name(`, `const name = (...) =>`, `let name = function`, ...
static ENTRY_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)\s*\()|(?:\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>))",
    )
    .expect("entry point pattern is valid")
});

/// Find the first function declared in the submission
pub fn detect_entry_point(code: &str) -> Option<String> {
    ENTRY_POINT.captures(code).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

/// The submission is compiled with `new Function`, so a syntax error is
/// reported instead of crashing the harness, and module-scoped `require`
/// is not visible to it.
const TEMPLATE: &str = r#""use strict";
const __marker = @MARKER@;
const __source = @SOURCE@;
const __entry = @ENTRY@;
const __args = JSON.parse(@ARGS@);

function __emit(report) {
  let line;
  try {
    line = JSON.stringify(report);
  } catch (e) {
    line = JSON.stringify({
      status: "runtime_error",
      message: "Result is not JSON serialisable: " + String((e && e.message) || e),
    });
  }
  process.stdout.write("\n" + __marker + line + "\n");
}

function __describe(e) {
  if (e && typeof e === "object" && "name" in e && "message" in e) {
    return e.name + ": " + e.message;
  }
  return String(e);
}

let __factory;
try {
  __factory = new Function(
    __source + "\n;return (typeof " + __entry + " === 'function') ? " + __entry + " : undefined;"
  );
} catch (e) {
  __emit({ status: "syntax_error", message: __describe(e) });
  process.exit(0);
}

(async () => {
  try {
    const fn = __factory();
    if (typeof fn !== "function") {
      throw new Error("Entry point '" + __entry + "' is not a function");
    }
    const value = await fn(...__args);
    __emit({ status: "ok", value: value === undefined ? null : value });
  } catch (e) {
    __emit({ status: "runtime_error", message: __describe(e) });
  }
  process.exit(0);
})();
"#;

/// Render the Node.js harness
pub fn harness(literals: &HarnessLiterals) -> String {
    literals.render(TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_function_declaration() {
        assert_eq!(
            detect_entry_point("function add(a,b){return a+b}"),
            Some("add".to_string())
        );
    }

    #[test]
    fn test_detects_arrow_and_expression_functions() {
        assert_eq!(
            detect_entry_point("const twoSum = (nums, target) => {}"),
            Some("twoSum".to_string())
        );
        assert_eq!(
            detect_entry_point("let solve = async function (x) {}"),
            Some("solve".to_string())
        );
        assert_eq!(
            detect_entry_point("var $id = x => x"),
            Some("$id".to_string())
        );
    }

    #[test]
    fn test_first_definition_wins() {
        let code = "const LIMIT = 10;\nfunction helper() {}\nfunction main() {}";
        assert_eq!(detect_entry_point(code), Some("helper".to_string()));
    }

    #[test]
    fn test_no_function() {
        assert_eq!(detect_entry_point("const x = 5;"), None);
    }
}
