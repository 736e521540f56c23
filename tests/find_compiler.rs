//! Integration tests for compiler resolution precedence.

mod common;

use ccache::args::InvocationMode::{self, Masquerading, Wrapped};
use ccache::compiler::{find_compiler, ResolveError};
use common::{argv, resolved};

/// Resolve a one-word invocation; `found` overrides the search result.
fn helper(
    mode: InvocationMode,
    invoked: &str,
    configured: &str,
    found: Option<&str>,
) -> Result<String, ResolveError> {
    let search = |name: &str| match found {
        Some(result) => Some(result.to_string()).filter(|r| !r.is_empty()),
        None => resolved(name),
    };
    find_compiler(argv(&[invoked]), Some(configured), mode, search).map(|inv| inv.join(" "))
}

// =============================================================================
// NO CONFIGURED COMPILER
// =============================================================================

#[test]
fn masquerading_always_searches_basename() {
    assert_eq!(helper(Masquerading, "gcc", "", None).unwrap(), "resolved_gcc");
    assert_eq!(helper(Masquerading, "relative/gcc", "", None).unwrap(), "resolved_gcc");
    assert_eq!(helper(Masquerading, "/absolute/gcc", "", None).unwrap(), "resolved_gcc");
}

#[test]
fn wrapped_resolves_only_bare_names() {
    assert_eq!(helper(Wrapped, "gcc", "", None).unwrap(), "resolved_gcc");
    assert_eq!(helper(Wrapped, "rel/gcc", "", None).unwrap(), "rel/gcc");
    assert_eq!(helper(Wrapped, "/abs/gcc", "", None).unwrap(), "/abs/gcc");
}

#[test]
fn wrapped_bare_name_resolving_to_wrapper_fails() {
    assert_eq!(
        helper(Wrapped, "gcc", "", Some("ccache")),
        Err(ResolveError::SelfLoop {
            compiler: "gcc".to_string(),
            resolved: "ccache".to_string(),
        })
    );
    assert_eq!(helper(Wrapped, "rel/gcc", "", Some("ccache")).unwrap(), "rel/gcc");
    assert_eq!(helper(Wrapped, "/abs/gcc", "", Some("ccache")).unwrap(), "/abs/gcc");
}

#[test]
fn wrapped_bare_name_not_found_fails() {
    assert_eq!(
        helper(Wrapped, "gcc", "", Some("")),
        Err(ResolveError::NotFound {
            compiler: "gcc".to_string()
        })
    );
    assert_eq!(helper(Wrapped, "rel/gcc", "", Some("")).unwrap(), "rel/gcc");
    assert_eq!(helper(Wrapped, "/abs/gcc", "", Some("")).unwrap(), "/abs/gcc");
}

#[test]
fn masquerading_uses_search_result_unchecked() {
    assert_eq!(helper(Masquerading, "/some/path/gcc", "", Some("/real/gcc")).unwrap(), "/real/gcc");
    assert_eq!(helper(Masquerading, "gcc", "", Some("ccache")).unwrap(), "ccache");
    assert_eq!(helper(Masquerading, "gcc", "", Some("")).unwrap(), "");
}

// =============================================================================
// CONFIGURED COMPILER
// =============================================================================

#[test]
fn config_overrides_masquerading_name() {
    for invoked in ["gcc", "rel/gcc", "/abs/gcc"] {
        assert_eq!(helper(Masquerading, invoked, "config", None).unwrap(), "resolved_config");
        assert_eq!(helper(Masquerading, invoked, "rel/config", None).unwrap(), "rel/config");
        assert_eq!(helper(Masquerading, invoked, "/abs/config", None).unwrap(), "/abs/config");
    }
}

#[test]
fn config_overrides_wrapped_name() {
    assert_eq!(helper(Wrapped, "gcc", "config", None).unwrap(), "resolved_config");
    assert_eq!(helper(Wrapped, "gcc", "rel/config", None).unwrap(), "rel/config");
    assert_eq!(helper(Wrapped, "gcc", "/abs/config", None).unwrap(), "/abs/config");
    assert_eq!(helper(Wrapped, "rel/gcc", "config", None).unwrap(), "resolved_config");
    assert_eq!(helper(Wrapped, "/abs/gcc", "config", None).unwrap(), "resolved_config");
}

#[test]
fn configured_compiler_is_not_checked() {
    assert_eq!(helper(Wrapped, "gcc", "config", Some("ccache")).unwrap(), "ccache");
    assert_eq!(helper(Wrapped, "gcc", "config", Some("")).unwrap(), "");
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[test]
fn only_program_slot_changes() {
    let out = find_compiler(
        argv(&["/some/path/gcc", "-c", "-o", "out dir/x.o", "x.c"]),
        None,
        Masquerading,
        resolved,
    )
    .unwrap();
    assert_eq!(out, argv(&["resolved_gcc", "-c", "-o", "out dir/x.o", "x.c"]));
}

#[test]
fn search_receives_the_right_name() {
    let seen = std::cell::RefCell::new(Vec::new());
    let search = |name: &str| {
        seen.borrow_mut().push(name.to_string());
        resolved(name)
    };
    find_compiler(argv(&["/usr/lib/ccache/g++"]), None, Masquerading, &search).unwrap();
    find_compiler(argv(&["clang"]), Some("nvcc"), Wrapped, &search).unwrap();
    find_compiler(argv(&["/abs/gcc"]), None, Wrapped, &search).unwrap();
    assert_eq!(*seen.borrow(), argv(&["g++", "nvcc"]));
}
