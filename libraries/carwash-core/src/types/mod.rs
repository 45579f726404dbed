/// Domain types shared across the workspace
mod audio;

pub use audio::{AudioBuffer, SampleFormat, SampleRate};
