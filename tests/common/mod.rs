use surfkit::host::headless::HostCall;
use surfkit::{HeadlessHost, SurfaceManager};

/// Host and manager sized like a typical window, with `create` already applied.
pub fn create_test_layout(width: f64, height: f64) -> (HeadlessHost, SurfaceManager<HeadlessHost>) {
    let host = HeadlessHost::new(width, height);
    let mut manager = SurfaceManager::new();
    manager.create(width, height);
    (host, manager)
}

/// Element ids in the order they were first touched by `calls`.
pub fn touch_order(calls: &[HostCall]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for call in calls {
        if order.last().map(String::as_str) != Some(call.id()) {
            order.push(call.id().to_string());
        }
    }
    order
}
