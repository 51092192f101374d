// Layout engine: font metrics, greedy word wrap and page flow.
// Pure and CPU-bound. Callers on the async path run it inside tokio::task::spawn_blocking.

pub mod flow;
pub mod font_metrics;

pub use flow::{flow_blocks, Align, Block, Page, PageGeometry, TextStyle, A4_PORTRAIT};
pub use font_metrics::DEJAVU_SANS;
