mod page_host;
mod page_probe;
pub mod scripts;
mod surface;

pub use {page_host::PageHost, page_probe::PageProbe, surface::Surface};
