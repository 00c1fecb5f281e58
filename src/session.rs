use std::io::Write;
use std::path::Path;

use crate::engine::{Engine, EnginePage, EngineSession, LaunchConfig};
use crate::error::Result;
use crate::progress::ProgressCallback;
use crate::request::{CaptureMode, RenderRequest};

/// Drives one render through its linear lifecycle: launch, page,
/// cookies, navigate, capture, teardown.
pub struct SessionDriver<E: Engine> {
    engine: E,
    launch: LaunchConfig,
    progress: Option<ProgressCallback>,
}

impl<E: Engine> SessionDriver<E> {
    pub fn new(engine: E, launch: LaunchConfig) -> Self {
        SessionDriver {
            engine,
            launch,
            progress: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn log(&self, message: &str) {
        if let Some(callback) = &self.progress {
            callback(message);
        }
    }

    /// Renders one page and returns the capture bytes.
    ///
    /// The browser is torn down on every path after launch: a navigation
    /// or capture failure still closes the session before the error is
    /// returned.
    pub async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        let mut session = self.engine.launch(&self.launch).await?;
        let outcome = self.drive(&mut session, request).await;
        let closed = session.close().await;
        let bytes = outcome?;
        closed?;
        self.log("Done");
        Ok(bytes)
    }

    async fn drive(
        &self,
        session: &mut E::Session,
        request: &RenderRequest,
    ) -> Result<Vec<u8>> {
        let mut page = session.new_page().await?;

        if !request.cookies.is_empty() {
            self.log("Setting cookies");
            page.set_cookies(&request.cookies).await?;
        }

        self.log(&format!("Loading {}", request.target_url));
        page.goto(&request.target_url, &request.navigation).await?;

        self.log(&format!("Writing {}", describe_output(request.output.as_deref())));
        let bytes = match &request.mode {
            CaptureMode::Pdf(options) => page.pdf(options, request.output.as_deref()).await?,
            CaptureMode::Screenshot(options) => {
                if let Some(viewport) = options.viewport {
                    self.log(&format!("Setting viewport to {viewport}"));
                    page.set_viewport(viewport).await?;
                }
                page.screenshot(options, request.output.as_deref()).await?
            }
        };

        if request.output.is_none() {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&bytes)?;
            handle.flush()?;
        }

        Ok(bytes)
    }
}

fn describe_output(output: Option<&Path>) -> String {
    match output {
        Some(path) => path.display().to_string(),
        None => "STDOUT".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::request::{NavigationOptions, PdfOptions, ScreenshotOptions};
    use crate::viewport::Viewport;
    use std::sync::{Arc, Mutex};

    type CallLog = Arc<Mutex<Vec<String>>>;

    #[derive(Default, Clone)]
    struct Script {
        fail_navigation: bool,
        fail_capture: bool,
    }

    struct FakeEngine {
        calls: CallLog,
        script: Script,
    }

    struct FakeSession {
        calls: CallLog,
        script: Script,
    }

    struct FakePage {
        calls: CallLog,
        script: Script,
    }

    impl FakeEngine {
        fn new(script: Script) -> (FakeEngine, CallLog) {
            let calls: CallLog = Arc::default();
            (
                FakeEngine {
                    calls: calls.clone(),
                    script,
                },
                calls,
            )
        }
    }

    impl Engine for FakeEngine {
        type Session = FakeSession;

        async fn launch(&self, _config: &LaunchConfig) -> Result<FakeSession> {
            self.calls.lock().unwrap().push("launch".to_string());
            Ok(FakeSession {
                calls: self.calls.clone(),
                script: self.script.clone(),
            })
        }
    }

    impl EngineSession for FakeSession {
        type Page = FakePage;

        async fn new_page(&mut self) -> Result<FakePage> {
            self.calls.lock().unwrap().push("new_page".to_string());
            Ok(FakePage {
                calls: self.calls.clone(),
                script: self.script.clone(),
            })
        }

        async fn close(&mut self) -> Result<()> {
            self.calls.lock().unwrap().push("close".to_string());
            Ok(())
        }
    }

    impl EnginePage for FakePage {
        async fn set_cookies(&mut self, cookies: &[crate::cookies::CookieSpec]) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("set_cookies({})", cookies.len()));
            Ok(())
        }

        async fn goto(&mut self, url: &str, options: &NavigationOptions) -> Result<()> {
            self.calls.lock().unwrap().push(format!("goto({url})"));
            if self.script.fail_navigation {
                return Err(RenderError::NavigationTimeout {
                    url: url.to_string(),
                    wait_until: options.wait_until.clone(),
                    timeout_ms: options.timeout_ms,
                });
            }
            Ok(())
        }

        async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("set_viewport({viewport})"));
            Ok(())
        }

        async fn pdf(&mut self, _options: &PdfOptions, output: Option<&Path>) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push("pdf".to_string());
            if self.script.fail_capture {
                return Err(RenderError::Capture("print failed".to_string()));
            }
            let bytes = b"%PDF-1.4 fake".to_vec();
            if let Some(path) = output {
                std::fs::write(path, &bytes)?;
            }
            Ok(bytes)
        }

        async fn screenshot(
            &mut self,
            _options: &ScreenshotOptions,
            output: Option<&Path>,
        ) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push("screenshot".to_string());
            if self.script.fail_capture {
                return Err(RenderError::Capture("capture failed".to_string()));
            }
            let bytes = b"\x89PNG fake".to_vec();
            if let Some(path) = output {
                std::fs::write(path, &bytes)?;
            }
            Ok(bytes)
        }
    }

    fn pdf_request(output: Option<std::path::PathBuf>) -> RenderRequest {
        RenderRequest {
            target_url: "https://example.com/".to_string(),
            navigation: NavigationOptions::default(),
            cookies: Vec::new(),
            output,
            mode: CaptureMode::Pdf(PdfOptions::default()),
        }
    }

    #[tokio::test]
    async fn pdf_render_runs_lifecycle_in_order() {
        let (engine, calls) = FakeEngine::new(Script::default());
        let driver = SessionDriver::new(engine, LaunchConfig::default());
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let bytes = driver
            .render(&pdf_request(Some(tmp.path().to_path_buf())))
            .await
            .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "launch",
                "new_page",
                "goto(https://example.com/)",
                "pdf",
                "close"
            ]
        );
    }

    #[tokio::test]
    async fn cookies_are_set_before_navigation() {
        let (engine, calls) = FakeEngine::new(Script::default());
        let driver = SessionDriver::new(engine, LaunchConfig::default());
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut request = pdf_request(Some(tmp.path().to_path_buf()));
        request.cookies = vec![crate::cookies::CookieSpec {
            name: "session".to_string(),
            value: "abc".to_string(),
            url: request.target_url.clone(),
        }];

        driver.render(&request).await.unwrap();

        let calls = calls.lock().unwrap();
        let cookie_pos = calls.iter().position(|c| c.starts_with("set_cookies")).unwrap();
        let goto_pos = calls.iter().position(|c| c.starts_with("goto")).unwrap();
        assert!(cookie_pos < goto_pos);
    }

    #[tokio::test]
    async fn viewport_is_applied_between_navigation_and_capture() {
        let (engine, calls) = FakeEngine::new(Script::default());
        let driver = SessionDriver::new(engine, LaunchConfig::default());
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let request = RenderRequest {
            target_url: "https://example.com/".to_string(),
            navigation: NavigationOptions::default(),
            cookies: Vec::new(),
            output: Some(tmp.path().to_path_buf()),
            mode: CaptureMode::Screenshot(ScreenshotOptions {
                viewport: Some(Viewport {
                    width: 800,
                    height: 600,
                }),
                ..ScreenshotOptions::default()
            }),
        };

        driver.render(&request).await.unwrap();

        let calls = calls.lock().unwrap();
        let goto_pos = calls.iter().position(|c| c.starts_with("goto")).unwrap();
        let viewport_pos = calls
            .iter()
            .position(|c| c == "set_viewport(800x600)")
            .unwrap();
        let capture_pos = calls.iter().position(|c| c == "screenshot").unwrap();
        assert!(goto_pos < viewport_pos);
        assert!(viewport_pos < capture_pos);
    }

    #[tokio::test]
    async fn session_is_closed_when_navigation_fails() {
        let (engine, calls) = FakeEngine::new(Script {
            fail_navigation: true,
            ..Script::default()
        });
        let driver = SessionDriver::new(engine, LaunchConfig::default());

        let err = driver.render(&pdf_request(None)).await.unwrap_err();
        assert!(matches!(err, RenderError::NavigationTimeout { .. }));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.last().map(String::as_str), Some("close"));
        assert!(!calls.iter().any(|c| c == "pdf"));
    }

    #[tokio::test]
    async fn session_is_closed_when_capture_fails() {
        let (engine, calls) = FakeEngine::new(Script {
            fail_capture: true,
            ..Script::default()
        });
        let driver = SessionDriver::new(engine, LaunchConfig::default());

        let err = driver.render(&pdf_request(None)).await.unwrap_err();
        assert!(matches!(err, RenderError::Capture(_)));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.last().map(String::as_str), Some("close"));
    }

    #[tokio::test]
    async fn output_file_receives_capture_bytes() {
        let (engine, _calls) = FakeEngine::new(Script::default());
        let driver = SessionDriver::new(engine, LaunchConfig::default());
        let tmp = tempfile::NamedTempFile::new().unwrap();

        driver
            .render(&pdf_request(Some(tmp.path().to_path_buf())))
            .await
            .unwrap();

        let written = std::fs::read(tmp.path()).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn progress_lines_follow_the_lifecycle() {
        let (engine, _calls) = FakeEngine::new(Script::default());
        let lines: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = lines.clone();
        let driver = SessionDriver::new(engine, LaunchConfig::default()).with_progress(Arc::new(
            move |msg: &str| sink.lock().unwrap().push(msg.to_string()),
        ));
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut request = pdf_request(Some(tmp.path().to_path_buf()));
        request.cookies = vec![crate::cookies::CookieSpec {
            name: "a".to_string(),
            value: "b".to_string(),
            url: request.target_url.clone(),
        }];

        driver.render(&request).await.unwrap();

        let lines = lines.lock().unwrap();
        assert_eq!(lines[0], "Setting cookies");
        assert_eq!(lines[1], "Loading https://example.com/");
        assert!(lines[2].starts_with("Writing "));
        assert_eq!(lines.last().map(String::as_str), Some("Done"));
    }

    #[test]
    fn describe_output_falls_back_to_stdout() {
        assert_eq!(describe_output(None), "STDOUT");
        assert_eq!(
            describe_output(Some(Path::new("out.pdf"))),
            "out.pdf"
        );
    }
}
