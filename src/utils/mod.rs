pub(crate) mod debug;
pub(crate) mod timezone;

pub(crate) use debug::{scan_debug_enabled, set_scan_debug};
pub(crate) use timezone::Timezone;
