//! Speech engine backed by an external text-to-speech program
//! (espeak-ng by default). The utterance is passed on stdin.

use std::collections::VecDeque;
use std::env;
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

use super::speech::{SpeechEngine, SpeechError, SpeechEvent, Utterance};
use crate::config::SpeechConfig;

pub struct ProcessSpeechEngine {
    config: SpeechConfig,
    child: Option<Child>,
    paused: bool,
    events: VecDeque<SpeechEvent>,
}

impl ProcessSpeechEngine {
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            config,
            child: None,
            paused: false,
            events: VecDeque::new(),
        }
    }

    /// Send a job-control signal to the running synthesizer
    #[cfg(unix)]
    fn signal(&self, sig: libc::c_int) {
        if let Some(child) = &self.child {
            let pid = child.id() as libc::pid_t;
            // SAFETY: pid belongs to a child we spawned and have not reaped yet
            let rc = unsafe { libc::kill(pid, sig) };
            if rc != 0 {
                warn!("Failed to signal speech process {}: {}", pid, std::io::Error::last_os_error());
            }
        }
    }

    #[cfg(not(unix))]
    fn signal(&self, _sig: i32) {}
}

/// Whether `program` resolves to an executable on PATH (or is a path itself)
fn program_exists(program: &str) -> bool {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file();
    }
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

impl SpeechEngine for ProcessSpeechEngine {
    fn is_supported(&self) -> bool {
        program_exists(&self.config.program)
    }

    fn is_speaking(&self) -> bool {
        self.child.is_some()
    }

    fn is_paused(&self) -> bool {
        self.child.is_some() && self.paused
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        self.cancel();

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Engine(format!("failed to start {}: {}", self.config.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // Dropping stdin closes it so the synthesizer starts speaking
            if let Err(e) = stdin.write_all(utterance.text.as_bytes()) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SpeechError::Engine(format!("failed to send text: {}", e)));
            }
        }

        debug!(pid = child.id(), lang = %utterance.lang, "Speech process started");
        self.child = Some(child);
        self.paused = false;
        self.events.push_back(SpeechEvent::Started);
        Ok(())
    }

    fn pause(&mut self) {
        #[cfg(unix)]
        self.signal(libc::SIGSTOP);
        self.paused = true;
    }

    fn resume(&mut self) {
        #[cfg(unix)]
        self.signal(libc::SIGCONT);
        self.paused = false;
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            // A stopped process must be continued before it can die
            if self.paused {
                #[cfg(unix)]
                {
                    let pid = child.id() as libc::pid_t;
                    // SAFETY: see `signal`
                    unsafe { libc::kill(pid, libc::SIGCONT) };
                }
            }
            let _ = child.kill();
            let _ = child.wait();
        }
        self.paused = false;
        self.events.clear();
    }

    fn poll(&mut self) -> Option<SpeechEvent> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }

        let child = self.child.as_mut()?;
        match child.try_wait() {
            Ok(Some(status)) => {
                self.child = None;
                self.paused = false;
                if status.success() {
                    Some(SpeechEvent::Ended)
                } else {
                    Some(SpeechEvent::Failed(format!("synthesizer exited with {}", status)))
                }
            }
            Ok(None) => None,
            Err(e) => {
                self.child = None;
                Some(SpeechEvent::Failed(e.to_string()))
            }
        }
    }
}

impl Drop for ProcessSpeechEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(program: &str, args: &[&str]) -> ProcessSpeechEngine {
        ProcessSpeechEngine::new(SpeechConfig {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_missing_program_is_unsupported() {
        let e = engine("definitely-not-a-real-tts-binary", &[]);
        assert!(!e.is_supported());
        assert!(!e.is_speaking());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_lifecycle_reports_start_and_end() {
        let mut e = engine("cat", &[]);
        assert!(e.is_supported());
        e.speak(Utterance::new("hello")).unwrap();
        assert_eq!(e.poll(), Some(SpeechEvent::Started));

        let mut ended = None;
        for _ in 0..200 {
            if let Some(event) = e.poll() {
                ended = Some(event);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(ended, Some(SpeechEvent::Ended));
        assert!(!e.is_speaking());
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_stops_paused_process() {
        let mut e = engine("sleep", &["30"]);
        e.speak(Utterance::new("ignored")).unwrap();
        e.pause();
        assert!(e.is_paused());
        e.cancel();
        assert!(!e.is_speaking());
        assert_eq!(e.poll(), None);
    }
}
