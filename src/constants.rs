// Output audio parameters. Samples are played at their native rate, so the kit
// should be recorded at SAMPLE_RATE.
pub const SAMPLE_RATE: u32 = 44100; // 44.1 kHz sample rate
pub const BIT_DEPTH: u16 = 16; // 16 bits per sample
pub const CHANNELS: u16 = 2; // Stereo channel
