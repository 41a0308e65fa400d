#![forbid(unsafe_code)]

use path_absolutize::Absolutize;
use std::ops::Deref;
use std::path::Path;

use poem::Request;

use log::{debug, LevelFilter};

// ***************************************************************************
// GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_absolute_path:
// ---------------------------------------------------------------------------
/** Replace tilde (~) and environment variable values in a path name and
 * then construct the absolute path name.  Unlike canonicalize, absolutize
 * does not care whether the file exists.  On any failure the original path
 * is returned unchanged.
 */
pub fn get_absolute_path(path: &str) -> String {
    // Replace ~ and environment variable values if possible.
    let s = match shellexpand::full(path) {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };

    // Convert to absolute path if necessary.
    let p = Path::new(s.deref());
    let p1 = match p.absolutize() {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };
    let p2 = match p1.to_str() {
        Some(x) => x,
        None => return path.to_owned(),
    };

    p2.to_owned()
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
pub trait RequestDebug {
    type Req;
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// format_request:
// ---------------------------------------------------------------------------
/** Build the multi-line description of an http request that debug_request
 * writes to the log.
 */
pub fn format_request(http_req: &Request, req: &impl RequestDebug) -> String {
    // Accumulate the output.
    let mut s = "\n".to_string();

    // Restate the URI.
    let uri = http_req.uri();
    s += format!("  URI: {:?}\n", uri).as_str();

    // Accumulate the headers
    for v in http_req.headers().iter() {
         s += format!("  Header: {} = {:?} \n", v.0, v.1).as_str();
    };

    // List query parameters.
    if let Some(q) = uri.query() {
        s += format!("  Query Parameters: {:?}\n", q).as_str();
    } else {
        s += "  * No Query Parameters\n";
    }

    // Add the request's information.
    s += req.get_request_info().as_str();
    s
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Check that debug or higher logging is in effect.
    if log::max_level() < LevelFilter::Debug {
        return;
    }

    // Write the single log record.
    debug!("{}", format_request(http_req, req));
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    struct ReqTest;

    impl RequestDebug for ReqTest {
        type Req = ReqTest;
        fn get_request_info(&self) -> String {
            "  Request:\n    name: World".to_string()
        }
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(get_absolute_path("/etc/hello.toml"), "/etc/hello.toml");
    }

    #[test]
    fn relative_path_made_absolute() {
        let p = get_absolute_path("config/hello.toml");
        assert!(Path::new(&p).is_absolute(), "{}", p);
        assert!(p.ends_with("config/hello.toml"), "{}", p);
    }

    #[test]
    fn format_with_query() {
        let http_req = Request::builder()
            .uri(poem::http::Uri::from_static("/hello?name=World"))
            .header("x-test", "yes")
            .finish();
        let s = format_request(&http_req, &ReqTest);
        assert!(s.contains("URI: /hello?name=World"), "{}", s);
        assert!(s.contains("Header: x-test = \"yes\""), "{}", s);
        assert!(s.contains("Query Parameters: \"name=World\""), "{}", s);
        assert!(s.ends_with("name: World"), "{}", s);
    }

    #[test]
    fn format_without_query() {
        let http_req = Request::builder()
            .uri(poem::http::Uri::from_static("/hello"))
            .finish();
        let s = format_request(&http_req, &ReqTest);
        assert!(s.contains("* No Query Parameters"), "{}", s);
    }
}
