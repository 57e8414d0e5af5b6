use super::*;
use crate::codec::format::FORMAT_VERSION;
use crate::codec::record::decode_record;
use crate::model::contour::Color;

fn raw_frame(seed: f32) -> (Vec<Vec<Point>>, Vec<i32>) {
    (
        vec![
            vec![
                Point::new(seed, 0.0),
                Point::new(seed + 4.0, 0.0),
                Point::new(seed + 4.0, 4.0),
            ],
            vec![Point::new(seed + 1.0, 1.0), Point::new(seed + 2.0, 2.0)],
            vec![],
        ],
        vec![-1, 0, 1],
    )
}

fn encoder_with(frames: usize) -> VideoEncoder {
    let mut enc = VideoEncoder::new(25.0, Dimensions::new(320, 240));
    for i in 0..frames {
        let (contours, hierarchy) = raw_frame(i as f32);
        enc.feed_frame(contours, &hierarchy).unwrap();
    }
    enc
}

#[test]
fn feed_frame_derives_colors_and_keeps_order() {
    let enc = encoder_with(1);
    let frame = enc.video().get(0).unwrap();
    let colors: Vec<Color> = frame.iter().map(|c| c.color).collect();
    assert_eq!(colors, vec![Color::White, Color::Black, Color::White]);
    assert_eq!(frame.contours[0].points[1], Point::new(4.0, 0.0));
    assert!(frame.contours[2].is_empty());
}

#[test]
fn feed_frame_rejects_mismatched_hierarchy() {
    let mut enc = encoder_with(0);
    let err = enc
        .feed_frame(vec![vec![Point::new(0.0, 0.0)]], &[-1, 0])
        .unwrap_err();
    assert!(matches!(err, VecVidError::Validation(_)));
    assert_eq!(enc.video().frame_count(), 0);
}

#[test]
fn feed_frame_with_no_contours_is_valid() {
    let mut enc = encoder_with(0);
    assert_eq!(enc.feed_frame(vec![], &[]).unwrap(), 0);
    assert_eq!(enc.encode_frame(0).unwrap(), vec![4, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn encode_frame_matches_record_codec() {
    let enc = encoder_with(2);
    let bytes = enc.encode_frame(1).unwrap();
    let (frame, _) = decode_record(&bytes).unwrap();
    assert_eq!(&frame, enc.video().get(1).unwrap());
    assert!(matches!(enc.encode_frame(2), Err(VecVidError::Value(_))));
}

#[test]
fn header_carries_version_rate_and_size() {
    let enc = encoder_with(0);
    let header = Header::from_bytes(&enc.encode_header()).unwrap();
    assert_eq!(header.version, FORMAT_VERSION);
    assert_eq!(header.framerate, 25.0);
    assert_eq!(header.dimensions, Dimensions::new(320, 240));
}

#[test]
fn dump_continue_writes_header_once_and_only_new_frames() {
    let mut enc = encoder_with(0);
    let mut sink = Vec::new();
    assert_eq!(enc.dump_continue(&mut sink).unwrap(), HEADER_SIZE as u64);
    assert_eq!(enc.dump_continue(&mut sink).unwrap(), 0);
    assert_eq!(sink.len(), HEADER_SIZE);

    let (contours, hierarchy) = raw_frame(0.0);
    enc.feed_frame(contours, &hierarchy).unwrap();
    let n = enc.dump_continue(&mut sink).unwrap();
    assert_eq!(n as usize, enc.encode_frame(0).unwrap().len());
    assert_eq!(enc.flushed_frames(), 1);
    assert_eq!(enc.pending_frames(), 0);
}

#[test]
fn streaming_flush_matches_single_flush() {
    let mut incremental = encoder_with(3);
    let mut a = Vec::new();
    incremental.dump_continue(&mut a).unwrap();
    for i in 3..5 {
        let (contours, hierarchy) = raw_frame(i as f32);
        incremental.feed_frame(contours, &hierarchy).unwrap();
    }
    incremental.dump_continue(&mut a).unwrap();

    let mut once = encoder_with(5);
    let mut b = Vec::new();
    once.dump_continue(&mut b).unwrap();

    assert_eq!(a, b);
}

#[test]
fn full_dump_matches_streaming_dump() {
    let mut enc = encoder_with(4);
    let mut full = Vec::new();
    enc.dump(&mut full).unwrap();
    let mut streamed = Vec::new();
    enc.dump_continue(&mut streamed).unwrap();
    assert_eq!(full, streamed);
}

#[test]
fn trim_dumped_empties_only_flushed_frames() {
    let mut enc = encoder_with(3);
    let mut sink = Vec::new();
    enc.dump_continue(&mut sink).unwrap();
    let (contours, hierarchy) = raw_frame(9.0);
    enc.feed_frame(contours, &hierarchy).unwrap();

    enc.trim_dumped();
    for i in 0..3 {
        assert_eq!(enc.video().get(i).unwrap().len(), 0);
    }
    assert_eq!(enc.video().get(3).unwrap().len(), 3);
    assert_eq!(enc.flushed_frames(), 3);
    assert_eq!(enc.video().frame_count(), 4);

    // Trimmed content cannot be re-dumped in full.
    assert!(matches!(
        enc.dump(&mut Vec::new()),
        Err(VecVidError::Validation(_))
    ));
}

#[test]
fn parallel_chunks_produce_identical_bytes() {
    let mut seq = encoder_with(0);
    let mut par = VideoEncoder::with_opts(
        25.0,
        Dimensions::new(320, 240),
        EncoderOpts {
            parallel: true,
            chunk_size: 3,
            threads: Some(2),
        },
    )
    .unwrap();
    for i in 0..10 {
        let (contours, hierarchy) = raw_frame(i as f32);
        seq.feed_frame(contours.clone(), &hierarchy).unwrap();
        par.feed_frame(contours, &hierarchy).unwrap();
    }

    let mut a = Vec::new();
    let mut b = Vec::new();
    seq.dump_continue(&mut a).unwrap();
    par.dump_continue(&mut b).unwrap();
    assert_eq!(a, b);
    assert_eq!(par.flushed_frames(), 10);
}

#[test]
fn invalid_opts_are_rejected() {
    let dims = Dimensions::new(1, 1);
    let zero_chunk = EncoderOpts {
        chunk_size: 0,
        ..EncoderOpts::default()
    };
    assert!(VideoEncoder::with_opts(30.0, dims, zero_chunk).is_err());

    let zero_threads = EncoderOpts {
        parallel: true,
        threads: Some(0),
        ..EncoderOpts::default()
    };
    assert!(matches!(
        VideoEncoder::with_opts(30.0, dims, zero_threads),
        Err(VecVidError::Validation(_))
    ));

    let two_threads = EncoderOpts {
        parallel: true,
        threads: Some(2),
        ..EncoderOpts::default()
    };
    assert!(VideoEncoder::with_opts(30.0, dims, two_threads).is_ok());
}

#[test]
fn failed_write_keeps_cursor_at_last_complete_record() {
    struct FailAfter(usize, Vec<u8>);
    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.0 == 0 {
                return Err(std::io::Error::other("disk full"));
            }
            self.0 -= 1;
            self.1.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut enc = encoder_with(3);
    // Header + two records succeed.
    let mut sink = FailAfter(3, Vec::new());
    let err = enc.dump_continue(&mut sink).unwrap_err();
    assert!(err.to_string().contains("frame record 2"));
    assert_eq!(enc.flushed_frames(), 2);
}
