#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn init_is_noop_but_callable_repeatedly() {
    init(log::Level::Debug);
    init(log::Level::Warn);
}
