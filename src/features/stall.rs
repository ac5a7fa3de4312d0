use log::trace;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum State {
    Buffering,
    Playing,
    Stalled,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StallReport {
    pub resumes:       Vec<f64>,
    pub stalls:        Vec<f64>,
    pub initial_delay: f64,
    pub stall_count:   usize,
    pub stall_time:    f64,
}

// A simplistic video player fed by per-second download volume. Buffer
// level is in seconds of playback; alpha is the level needed to start.
#[derive(Debug)]
pub struct Player {
    alpha:   f64,
    bitrate: f64,
    buffer:  f64,
    state:   State,
    resumes: Vec<f64>,
    stalls:  Vec<f64>,
}

impl Player {
    pub fn new(alpha: f64, bitrate: f64) -> Self {
        Self {
            alpha:   alpha,
            bitrate: bitrate,
            buffer:  0.0,
            state:   State::Buffering,
            resumes: Vec::new(),
            stalls:  Vec::new(),
        }
    }

    // elapsed counts seconds from 1, kbit is what arrived during that second.
    pub fn tick(&mut self, elapsed: usize, kbit: f64) {
        let elapsed = elapsed as f64;

        self.buffer += kbit / self.bitrate;

        match self.state {
            State::Buffering | State::Stalled if self.buffer >= self.alpha => {
                let fill = match kbit {
                    kbit if kbit > 0.0 => self.alpha * self.bitrate / kbit,
                    _                  => 0.0,
                };
                self.buffer = (self.buffer - 1.0).max(0.0);
                self.state  = State::Playing;
                self.resumes.push(elapsed + fill);
                trace!("playing at {:.3}s, buffer {:.3}", elapsed + fill, self.buffer);
            },
            State::Playing if self.buffer == 0.0 => {
                // nothing arrived this second and the buffer was empty
                self.state = State::Stalled;
                self.stalls.push(elapsed + self.alpha);
                trace!("stalled at {}s", elapsed);
            },
            State::Playing => {
                self.buffer = (self.buffer - 1.0).max(0.0);
            },
            State::Buffering | State::Stalled => (),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    pub fn finish(self) -> StallReport {
        let initial_delay = self.resumes.first().copied().unwrap_or(0.0);
        let stall_count   = self.resumes.len().saturating_sub(1);
        let stall_time    = self.resumes.iter().skip(1).sum::<f64>();

        StallReport {
            resumes:       self.resumes,
            stalls:        self.stalls,
            initial_delay: initial_delay,
            stall_count:   stall_count,
            stall_time:    stall_time,
        }
    }
}

pub fn simulate(download: &[f64], alpha: f64, bitrate: f64) -> StallReport {
    let mut player = Player::new(alpha, bitrate);
    for (second, &kbit) in download.iter().enumerate() {
        player.tick(second + 1, kbit);
    }
    player.finish()
}
