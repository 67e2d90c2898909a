#![allow(non_snake_case)]

use super::*;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

static SET_CALLS: AtomicUsize = AtomicUsize::new(0);
static UNSET_CALLS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn fake_log_set(
    _instance: *mut libvlc_instance_t,
    _cb: libvlc_log_cb,
    _data: *mut c_void,
) {
    SET_CALLS.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn fake_log_unset(_instance: *mut libvlc_instance_t) {
    UNSET_CALLS.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn fake_get_context(
    _ctx: *const libvlc_log_t,
    module: *mut *const c_char,
    header: *mut *const c_char,
    line: *mut c_uint,
) {
    unsafe {
        *module = ptr::null();
        *header = ptr::null();
        *line = 0;
    }
}

unsafe extern "C" fn noop_handler(
    _data: *mut c_void,
    _level: std::ffi::c_int,
    _ctx: *const libvlc_log_t,
    _fmt: *const c_char,
    _args: crate::va_list,
) {
}

#[test]
fn LoggingApi___from_raw___function_pointers_are_callable() {
    let api = LoggingApi::from_raw(fake_log_set, fake_log_unset, fake_get_context);

    let before_set = SET_CALLS.load(Ordering::SeqCst);
    let before_unset = UNSET_CALLS.load(Ordering::SeqCst);

    unsafe {
        (api.log_set)(ptr::null_mut(), noop_handler, ptr::null_mut());
        (api.log_unset)(ptr::null_mut());
    }

    assert_eq!(SET_CALLS.load(Ordering::SeqCst), before_set + 1);
    assert_eq!(UNSET_CALLS.load(Ordering::SeqCst), before_unset + 1);
}

#[test]
fn LoggingApi___from_raw___get_context_reports_no_module() {
    let api = LoggingApi::from_raw(fake_log_set, fake_log_unset, fake_get_context);

    let mut module: *const c_char = ptr::null();
    let mut header: *const c_char = ptr::null();
    let mut line: c_uint = 7;
    unsafe { (api.log_get_context)(ptr::null(), &mut module, &mut header, &mut line) };

    assert!(module.is_null());
    assert!(header.is_null());
    assert_eq!(line, 0);
}

#[test]
fn LoggingApi___clone___shares_function_pointers() {
    let api = LoggingApi::from_raw(fake_log_set, fake_log_unset, fake_get_context);
    let clone = api.clone();

    let before = SET_CALLS.load(Ordering::SeqCst);
    unsafe { (clone.log_set)(ptr::null_mut(), noop_handler, ptr::null_mut()) };

    assert_eq!(SET_CALLS.load(Ordering::SeqCst), before + 1);
}

#[test]
fn LoggingApi___load_from___missing_library_errors() {
    let result = LoggingApi::load_from("/nonexistent/libvlc-test-missing.so");

    assert!(matches!(result, Err(LoadError::LibraryLoad(_))));
}

#[test]
fn LoadError___display___names_the_failure() {
    let load = LoadError::LibraryLoad("libvlc.so.5: not found".to_string());
    let symbol = LoadError::SymbolNotFound("libvlc_log_set".to_string());

    assert!(load.to_string().starts_with("failed to load library"));
    assert!(symbol.to_string().starts_with("symbol not found"));
}
