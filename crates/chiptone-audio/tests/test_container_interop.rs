//! Cross-checks the container encoder against an independent WAV reader.

use std::io::Cursor;

use chiptone_audio::{decode_container, encode_container, synthesize_sequence, synthesize_tone};
use chiptone_spec::{AudioFormat, EnvelopeSpec, Note};

#[test]
fn test_hound_reads_encoded_tone() {
    let samples = synthesize_tone(523.25, 150, 22050, 0.8).unwrap();
    let container = encode_container(samples.clone(), &AudioFormat::mono(22050)).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(container.as_bytes())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read, samples.into_vec());
}

#[test]
fn test_hound_reads_encoded_sequence() {
    let samples = synthesize_sequence(
        &[Note(60), Note(64), Note(67), Note(72)],
        140.0,
        0.25,
        &EnvelopeSpec::new(64, 256),
        44100,
    )
    .unwrap();
    let container = encode_container(samples.clone(), &AudioFormat::mono(44100)).unwrap();

    let reader = hound::WavReader::new(Cursor::new(container.as_bytes())).unwrap();
    assert_eq!(reader.duration() as usize, samples.len());
}

#[test]
fn test_decoder_reads_hound_output() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 11025,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let expected: Vec<i16> = (0..300).map(|i| ((i * 97) % 6000 - 3000) as i16).collect();

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in &expected {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    let decoded = decode_container(cursor.get_ref()).unwrap();
    assert_eq!(decoded.format, AudioFormat::mono(11025));
    assert_eq!(decoded.samples.as_slice(), expected.as_slice());
}

#[test]
fn test_hound_reads_header_only_container() {
    let container = chiptone_audio::ContainerBuffer::silence(&AudioFormat::mono(8000)).unwrap();
    let reader = hound::WavReader::new(Cursor::new(container.as_bytes())).unwrap();
    assert_eq!(reader.duration(), 0);
}
