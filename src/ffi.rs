//! C ABI entry point called by the host pipeline.
//!
//! The host passes borrowed pointer/length pairs and receives either an owned
//! NUL-terminated buffer or null. No error detail crosses this boundary.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::slice;

use crate::diagnostics;
use crate::error::FilterError;
use crate::record::{Record, Timestamp};
use crate::transform::RecordTransformer;

/// Enrich one record.
///
/// # Arguments
/// * `tag_ptr`, `tag_len` - tag bytes, not NUL-terminated
/// * `time_sec`, `time_nsec` - record timestamp since the Unix epoch
/// * `record_ptr`, `record_len` - JSON payload bytes, not NUL-terminated
///
/// # Returns
/// * non-null - serialized enriched object followed by one NUL byte; the
///   caller owns the allocation
/// * null - payload was malformed, not an object, or the call failed; the
///   host should leave the record untouched
///
/// # Safety
/// Each pointer must be valid for reads of its length for the duration of
/// the call and must not be mutated concurrently. A null pointer is accepted
/// only with length 0.
#[no_mangle]
pub unsafe extern "C" fn enrich_record(
    tag_ptr: *const u8,
    tag_len: usize,
    time_sec: i64,
    time_nsec: i64,
    record_ptr: *const u8,
    record_len: usize,
) -> *mut u8 {
    diagnostics::init();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: validity of both regions is the caller's contract.
        let inputs = unsafe {
            borrow_input("tag", tag_ptr, tag_len).and_then(|tag| {
                borrow_input("record", record_ptr, record_len).map(|payload| (tag, payload))
            })
        };
        let (tag, payload) = match inputs {
            Ok(inputs) => inputs,
            Err(err) => {
                diagnostics::report_failure("", &err);
                return None;
            }
        };

        let record = Record::new(tag, Timestamp::new(time_sec, time_nsec), payload);
        match RecordTransformer::default().transform(&record) {
            Ok(output) => Some(output),
            Err(err) => {
                diagnostics::report_failure(&record.tag_text(), &err);
                None
            }
        }
    }));

    match outcome {
        Ok(Some(output)) => output.into_raw(),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            tracing::error!("panic while filtering record");
            ptr::null_mut()
        }
    }
}

/// Borrow a caller-owned region for the duration of the call.
///
/// # Safety
/// Non-null `ptr` must be valid for reads of `len` bytes.
unsafe fn borrow_input<'a>(
    argument: &'static str,
    ptr: *const u8,
    len: usize,
) -> Result<&'a [u8], FilterError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(FilterError::NullPointer { argument, len });
    }
    // SAFETY: non-null and valid for `len` bytes per the caller's contract.
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}
