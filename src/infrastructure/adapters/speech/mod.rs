//! Speech Adapter - 语音合成客户端实现

mod eleven_client;
mod fake_speech_client;

pub use eleven_client::{ElevenSpeechClient, ElevenSpeechClientConfig};
pub use fake_speech_client::FakeSpeechClient;
