//! Audio container sniffing.
//!
//! Both hosted backends want to know what they are receiving: OpenAI infers
//! the codec from the upload's file name, Deepgram from `Content-Type`.

/// A recognized audio container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Flac,
    Webm,
    Mp4,
    Unknown,
}

impl AudioFormat {
    /// Detect the container from its leading magic bytes.
    pub fn sniff(audio: &[u8]) -> Self {
        match audio {
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => AudioFormat::Wav,
            [b'I', b'D', b'3', ..] | [0xFF, 0xFB | 0xF3 | 0xF2, ..] => AudioFormat::Mp3,
            [b'O', b'g', b'g', b'S', ..] => AudioFormat::Ogg,
            [b'f', b'L', b'a', b'C', ..] => AudioFormat::Flac,
            [0x1A, 0x45, 0xDF, 0xA3, ..] => AudioFormat::Webm,
            [_, _, _, _, b'f', b't', b'y', b'p', ..] => AudioFormat::Mp4,
            _ => AudioFormat::Unknown,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Webm => "audio/webm",
            AudioFormat::Mp4 => "audio/mp4",
            AudioFormat::Unknown => "application/octet-stream",
        }
    }

    /// File name to attach to multipart uploads.
    pub fn file_name(self) -> &'static str {
        match self {
            AudioFormat::Wav => "answer.wav",
            AudioFormat::Mp3 => "answer.mp3",
            AudioFormat::Ogg => "answer.ogg",
            AudioFormat::Flac => "answer.flac",
            AudioFormat::Webm | AudioFormat::Unknown => "answer.webm",
            AudioFormat::Mp4 => "answer.m4a",
        }
    }
}
