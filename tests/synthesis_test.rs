use lingotalks::audio::{AssetOrigin, AudioFormat, TempStore};
use lingotalks::error::SynthesisError;
use lingotalks::tts::SpeechSynthesizer;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{
    ChunkedBackend, FailingBackend, FileBackend, MockConverter, SlowBackend, TestContext,
};

#[tokio::test]
async fn test_network_first_then_offline_fallback() {
    let ctx = TestContext::new();
    let network = Arc::new(FailingBackend::new("network"));
    let offline = Arc::new(FileBackend::wav("offline").only(&["en"]));
    let synth = ctx
        .synthesizer()
        .with_backend(network.clone())
        .with_backend(offline.clone());

    let asset = synth.generate("Good morning", "en").await.unwrap();
    assert_eq!(asset.origin(), AssetOrigin::Offline);
    assert_eq!(network.call_count(), 1);
    assert_eq!(offline.call_count(), 1);

    // The failed attempt's partial file is gone
    assert_eq!(ctx.files(), vec![asset.path().to_path_buf()]);
}

#[tokio::test]
async fn test_offline_only_serves_home_language() {
    let ctx = TestContext::new();
    let offline = Arc::new(FileBackend::wav("offline").only(&["en"]));
    let network = Arc::new(FileBackend::mp3("network"));
    let synth = ctx
        .synthesizer()
        .with_backend(offline.clone())
        .with_backend(network.clone());

    let asset = synth.generate("नमस्ते", "hi").await.unwrap();
    assert_eq!(asset.origin(), AssetOrigin::Network);
    assert_eq!(offline.call_count(), 0);

    let calls = network.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("नमस्ते".to_string(), "hi".to_string())]);
}

#[tokio::test]
async fn test_first_success_stops_the_chain() {
    let ctx = TestContext::new();
    let first = Arc::new(FileBackend::mp3("network"));
    let second = Arc::new(FileBackend::wav("offline"));
    let synth = ctx
        .synthesizer()
        .with_backend(first.clone())
        .with_backend(second.clone());

    synth.generate("Hello", "en").await.unwrap();
    assert_eq!(first.call_count(), 1);
    assert_eq!(second.call_count(), 0);
}

#[tokio::test]
async fn test_all_backends_failing_leaves_no_files() {
    let ctx = TestContext::new();
    let synth = ctx
        .synthesizer()
        .with_backend(Arc::new(FailingBackend::new("network")))
        .with_backend(Arc::new(FailingBackend::new("backup")))
        .with_converter(Arc::new(MockConverter::new()));

    let err = synth.generate("Hello", "es").await.unwrap_err();
    match err {
        SynthesisError::Backend { backend, message } => {
            assert_eq!(backend, "backup");
            assert!(message.contains("network unreachable"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(ctx.files().is_empty());
}

#[tokio::test]
async fn test_no_backend_for_language() {
    let ctx = TestContext::new();
    let synth = ctx
        .synthesizer()
        .with_backend(Arc::new(FileBackend::wav("offline").only(&["en"])));

    assert!(matches!(
        synth.generate("Hola", "es").await,
        Err(SynthesisError::BackendUnavailable)
    ));
}

#[tokio::test]
async fn test_language_code_is_case_insensitive() {
    let ctx = TestContext::new();
    let backend = Arc::new(FileBackend::mp3("network"));
    let synth = ctx.synthesizer().with_backend(backend.clone());

    synth.generate("Bonjour", "FR").await.unwrap();
    assert_eq!(backend.calls.lock().unwrap()[0].1, "fr");
}

#[tokio::test]
async fn test_conversion_replaces_raw_mp3() {
    let ctx = TestContext::new();
    let converter = Arc::new(MockConverter::new());
    let synth = ctx
        .synthesizer()
        .with_backend(Arc::new(FileBackend::mp3("network")))
        .with_converter(converter.clone());

    let asset = synth.generate("Hola", "es").await.unwrap();
    assert_eq!(asset.format(), AudioFormat::Wav);
    assert_eq!(asset.origin(), AssetOrigin::Network);
    assert_eq!(converter.call_count(), 1);
    assert_eq!(ctx.files(), vec![asset.path().to_path_buf()]);
}

#[tokio::test]
async fn test_conversion_failure_keeps_raw() {
    let ctx = TestContext::new();
    let synth = ctx
        .synthesizer()
        .with_backend(Arc::new(FileBackend::mp3("network")))
        .with_converter(Arc::new(MockConverter::failing()));

    let asset = synth.generate("Hola", "es").await.unwrap();
    assert_eq!(asset.format(), AudioFormat::Mp3);
    assert!(asset.exists());
    // The half-written WAV was removed
    assert_eq!(ctx.files(), vec![asset.path().to_path_buf()]);
}

#[tokio::test]
async fn test_wav_output_skips_converter() {
    let ctx = TestContext::new();
    let converter = Arc::new(MockConverter::new());
    let synth = ctx
        .synthesizer()
        .with_backend(Arc::new(FileBackend::wav("offline")))
        .with_converter(converter.clone());

    synth.generate("Hello", "en").await.unwrap();
    assert_eq!(converter.call_count(), 0);
}

#[tokio::test]
async fn test_slow_backend_times_out_and_falls_through() {
    let ctx = TestContext::new();
    let synth = SpeechSynthesizer::new(TempStore::new(ctx.dir()), Duration::from_millis(100))
        .with_backend(Arc::new(SlowBackend {
            delay: Duration::from_secs(30),
        }))
        .with_backend(Arc::new(FileBackend::mp3("network")));

    let asset = synth.generate("Hello", "en").await.unwrap();
    assert_eq!(asset.format(), AudioFormat::Mp3);
    assert_eq!(ctx.files(), vec![asset.path().to_path_buf()]);
}

#[tokio::test]
async fn test_timeout_is_reported_when_last() {
    let ctx = TestContext::new();
    let synth = SpeechSynthesizer::new(TempStore::new(ctx.dir()), Duration::from_millis(100))
        .with_backend(Arc::new(SlowBackend {
            delay: Duration::from_secs(30),
        }));

    let err = synth.generate("Hello", "en").await.unwrap_err();
    assert!(matches!(err, SynthesisError::Timeout { .. }));
    assert!(ctx.files().is_empty());
}

#[tokio::test]
async fn test_timeout_scales_with_request_count() {
    let ctx = TestContext::new();
    let synth = SpeechSynthesizer::new(TempStore::new(ctx.dir()), Duration::from_millis(200))
        .with_backend(Arc::new(ChunkedBackend {
            per_request: Duration::from_millis(120),
        }));

    // Three requests take longer than one timeout but each stays within it
    let asset = synth.generate("uno dos tres", "es").await.unwrap();
    assert_eq!(asset.format(), AudioFormat::Mp3);

    // A single request that overruns still times out
    let synth = SpeechSynthesizer::new(TempStore::new(ctx.dir()), Duration::from_millis(50))
        .with_backend(Arc::new(ChunkedBackend {
            per_request: Duration::from_secs(5),
        }));
    let err = synth.generate("uno", "es").await.unwrap_err();
    assert!(matches!(err, SynthesisError::Timeout { .. }));
}

#[tokio::test]
async fn test_unique_paths_per_generation() {
    let ctx = TestContext::new();
    let synth = ctx
        .synthesizer()
        .with_backend(Arc::new(FileBackend::wav("offline")));

    let a = synth.generate("one", "en").await.unwrap();
    let b = synth.generate("two", "en").await.unwrap();
    assert_ne!(a.path(), b.path());
    assert!(a
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("tts_"));
}
