#![forbid(unsafe_code)]

// ***************************************************************************
//                                Constants
// ***************************************************************************
/// Name used by both the CLI and the http endpoint when none is supplied.
pub const DEFAULT_NAME : &str = "CICD";

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// hello:
// ---------------------------------------------------------------------------
/** Return the greeting for the given name.  The name is used exactly as
 * given: no trimming, case folding or escaping takes place, so any string,
 * including the empty string, produces a greeting.
 */
pub fn hello(name: &str) -> String {
    format!("Hello, {}!", name)
}
