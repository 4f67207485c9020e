use super::*;

#[test]
fn first_acquire_succeeds() {
    let lock = OperationLock::new();
    assert!(lock.try_acquire().is_ok());
}

#[test]
fn second_acquire_is_rejected_while_held() {
    let lock = OperationLock::new();
    let _guard = lock.try_acquire().unwrap();

    let second = lock.try_acquire();
    assert!(second.is_err(), "overlapping run must be rejected");
    assert!(second.unwrap_err().contains("Operation in progress"));
}

#[test]
fn lock_is_free_again_after_guard_drops() {
    let lock = OperationLock::new();
    {
        let _guard = lock.try_acquire().unwrap();
    }
    assert!(lock.try_acquire().is_ok());
}

#[test]
fn independent_locks_do_not_contend() {
    let copy_lock = OperationLock::new();
    let build_lock = OperationLock::new();

    let _copy_guard = copy_lock.try_acquire().unwrap();
    assert!(
        build_lock.try_acquire().is_ok(),
        "a build run may start while a copy run is active"
    );
}
