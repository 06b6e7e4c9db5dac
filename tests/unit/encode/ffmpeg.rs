use super::*;

#[test]
fn format_follows_extension() {
    assert_eq!(FfmpegSinkOpts::new("a/b.gif").format, OutputFormat::Gif);
    assert_eq!(FfmpegSinkOpts::new("a/b.MP4").format, OutputFormat::Mp4);
    assert_eq!(FfmpegSinkOpts::new("a/b.webm").format, OutputFormat::Mp4);
    assert!("avi".parse::<OutputFormat>().is_err());
}

#[test]
fn mp4_args_pad_and_set_crf() {
    let mut opts = FfmpegSinkOpts::new("out.mp4");
    opts.crf = 28;
    let args = opts.output_args(Fps::integer(30).unwrap());
    let joined = args.join(" ");
    assert!(joined.contains("pad=ceil(iw/2)*2:ceil(ih/2)*2"));
    assert!(joined.contains("-crf 28"));
    assert!(joined.contains("-preset medium"));
    assert!(joined.contains("-pix_fmt yuv420p"));
}

#[test]
fn gif_rate_is_capped() {
    let opts = FfmpegSinkOpts::new("out.gif");
    let fast = opts.output_args(Fps::integer(30).unwrap());
    let pos = fast.iter().position(|a| a == "-r").unwrap();
    assert_eq!(fast[pos + 1], "15");
    assert!(fast[1].contains("palettegen=stats_mode=diff"));

    let slow = opts.output_args(Fps::integer(10).unwrap());
    assert!(!slow.iter().any(|a| a == "-r"));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("never.mp4"));
    let frame = Frame::new(2, 2);
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn zero_size_config_is_rejected() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("never.mp4"));
    let cfg = SinkConfig {
        width: 0,
        height: 2,
        fps: Fps::integer(30).unwrap(),
    };
    assert!(sink.begin(cfg).is_err());
}
