//! Screen implementations. Each screen is a top-level Component.

pub mod hosts;
pub mod status;

use crate::component::Component;
use crate::screen::ScreenId;

pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Hosts, Box::new(hosts::HostsScreen::new())),
        (ScreenId::Discovery, Box::new(status::StatusScreen::new())),
    ]
}
