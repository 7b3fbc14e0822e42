//! FIR tap sets, software filtering and filter responses

pub mod fast_fir;
pub mod fir;
pub mod response;
pub mod taps;
pub mod windows;

pub use fast_fir::FastFirFilter;
pub use fir::{convolve, filter_signal, ConvolutionMode, FirFilter};
pub use response::{compare_designs, fir_response, gain_at, DEFAULT_RESPONSE_LEN};
pub use taps::FilterTaps;
pub use windows::{generate_window, WindowType};
