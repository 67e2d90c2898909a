#![allow(non_snake_case)]

use super::*;
use crate::error::BridgeError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ffi::{CString, c_char, c_int, c_uint};
use std::ptr;
use std::sync::Mutex;
use vlcbridge_sys::{libvlc_log_cb, libvlc_log_t};

// Fake libVLC logging subsystem: records the (trampoline, state) pair per
// instance the way libvlc_log_set would store it.
static REGISTERED: Lazy<Mutex<HashMap<usize, (usize, usize)>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));
static UNSET: Lazy<Mutex<Vec<usize>>> = Lazy::new(|| Mutex::new(Vec::new()));

unsafe extern "C" fn fake_log_set(
    instance: *mut libvlc_instance_t,
    cb: libvlc_log_cb,
    data: *mut std::ffi::c_void,
) {
    REGISTERED
        .lock()
        .unwrap()
        .insert(instance as usize, (cb as usize, data as usize));
}

unsafe extern "C" fn fake_log_unset(instance: *mut libvlc_instance_t) {
    REGISTERED.lock().unwrap().remove(&(instance as usize));
    UNSET.lock().unwrap().push(instance as usize);
}

unsafe extern "C" fn record_is_module(
    record: *const libvlc_log_t,
    module: *mut *const c_char,
    header: *mut *const c_char,
    line: *mut c_uint,
) {
    unsafe {
        *module = record as *const c_char;
        *header = ptr::null();
        *line = 0;
    }
}

fn fake_api() -> LoggingApi {
    LoggingApi::from_raw(fake_log_set, fake_log_unset, record_is_module)
}

fn new_instance() -> Instance {
    let raw = Box::leak(Box::new(0u64)) as *mut u64 as *mut libvlc_instance_t;
    unsafe { Instance::from_raw(raw) }.unwrap()
}

fn fire(instance: Instance, level: c_int, record: *const libvlc_log_t, text: &str) {
    let key = instance.as_ptr() as usize;
    let (cb, data) = REGISTERED.lock().unwrap()[&key];
    // SAFETY: reconstructs the trampoline pointer captured by fake_log_set.
    let cb: libvlc_log_cb = unsafe { std::mem::transmute(cb) };
    let fmt = CString::new(text).unwrap();
    unsafe {
        cb(
            data as *mut std::ffi::c_void,
            level,
            record,
            fmt.as_ptr(),
            ptr::null_mut(),
        )
    };
}

type Captured = std::sync::Arc<Mutex<Vec<(Level, Option<String>, String)>>>;

fn capture() -> (Captured, impl Fn(Level, Option<&str>, &str) + Send + Sync + 'static) {
    let captured: Captured = std::sync::Arc::new(Mutex::new(Vec::new()));
    let sink = std::sync::Arc::clone(&captured);
    let handler = move |level: Level, module: Option<&str>, message: &str| {
        sink.lock()
            .unwrap()
            .push((level, module.map(str::to_owned), message.to_owned()));
    };
    (captured, handler)
}

#[test]
fn Instance___from_raw___null_is_error() {
    let result = unsafe { Instance::from_raw(ptr::null_mut()) };

    assert!(matches!(result, Err(BridgeError::NullInstance)));
}

#[test]
fn LogBridge___install___registers_trampoline_with_state() {
    let bridge = LogBridge::with_api(fake_api());
    let instance = new_instance();

    let subscription = bridge.install(instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();

    let key = instance.as_ptr() as usize;
    let (cb, data) = REGISTERED.lock().unwrap()[&key];
    assert_ne!(cb, 0);
    assert_ne!(data, 0, "the context pointer is the registered state");

    subscription.uninstall().unwrap();
}

#[test]
fn LogBridge___install___second_install_on_same_instance_rejected() {
    let bridge = LogBridge::with_api(fake_api());
    let instance = new_instance();
    let subscription = bridge.install(instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();

    let second = bridge.install(instance, |_: Level, _: Option<&str>, _: &str| {});

    assert!(matches!(second, Err(BridgeError::AlreadyInstalled)));
    subscription.uninstall().unwrap();
}

#[test]
fn LogBridge___install___events_reach_handler() {
    let bridge = LogBridge::with_api(fake_api());
    let instance = new_instance();
    let (captured, handler) = capture();
    let subscription = bridge.install(instance, handler).unwrap();

    fire(
        instance,
        3,
        c"avcodec".as_ptr() as *const libvlc_log_t,
        "more than 5 seconds of late video",
    );

    {
        let events = captured.lock().unwrap();
        assert_eq!(
            events.as_slice(),
            &[(
                Level::Warning,
                Some("avcodec".to_string()),
                "more than 5 seconds of late video".to_string()
            )]
        );
    }
    subscription.uninstall().unwrap();
}

#[test]
fn LogBridge___install_filtered___drops_below_min_level() {
    let bridge = LogBridge::with_api(fake_api());
    let instance = new_instance();
    let (captured, handler) = capture();
    let subscription = bridge
        .install_filtered(instance, Level::Warning, handler)
        .unwrap();

    fire(instance, 0, ptr::null(), "debug chatter");
    fire(instance, 4, ptr::null(), "kept");

    {
        let events = captured.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].2, "kept");
    }
    subscription.uninstall().unwrap();
}

#[test]
fn LogSubscription___uninstall___unsets_and_clears_registry() {
    let bridge = LogBridge::with_api(fake_api());
    let instance = new_instance();
    let subscription = bridge.install(instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();
    let id = subscription.id();
    let key = instance.as_ptr() as usize;

    subscription.uninstall().unwrap();

    assert!(UNSET.lock().unwrap().contains(&key));
    assert!(!REGISTERED.lock().unwrap().contains_key(&key));
    assert!(!crate::registry::BridgeRegistry::global().is_registered(id));
}

#[test]
fn LogSubscription___drop___uninstalls() {
    let bridge = LogBridge::with_api(fake_api());
    let instance = new_instance();
    let key = instance.as_ptr() as usize;

    {
        let _subscription = bridge.install(instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();
        assert!(REGISTERED.lock().unwrap().contains_key(&key));
    }

    assert!(!REGISTERED.lock().unwrap().contains_key(&key));
    assert!(UNSET.lock().unwrap().contains(&key));
}

#[test]
fn LogBridge___reinstall_after_uninstall___succeeds() {
    let bridge = LogBridge::with_api(fake_api());
    let instance = new_instance();

    let first = bridge.install(instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();
    first.uninstall().unwrap();
    let second = bridge.install(instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();

    second.uninstall().unwrap();
}

#[test]
fn LogBridge___two_instances___independent_lifecycles() {
    let bridge = LogBridge::with_api(fake_api());
    let first_instance = new_instance();
    let second_instance = new_instance();

    let first = bridge.install(first_instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();
    let second = bridge.install(second_instance, |_: Level, _: Option<&str>, _: &str| {}).unwrap();
    assert_ne!(first.id(), second.id());

    first.uninstall().unwrap();
    second.uninstall().unwrap();

    let unset = UNSET.lock().unwrap();
    assert!(unset.contains(&(first_instance.as_ptr() as usize)));
    assert!(unset.contains(&(second_instance.as_ptr() as usize)));
}

#[test]
fn teardown___unknown_id___invalid_handle() {
    assert!(matches!(
        teardown(u64::MAX),
        Err(BridgeError::InvalidHandle(_))
    ));
}
