use enum_dispatch::enum_dispatch;
use std::io::{self, Write};
use tracing::warn;

/// A sound the game wants played
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    /// The snake ate the regular food
    Chomp,

    /// A power-up appeared or a golden apple was eaten
    PowerUp,
}

#[enum_dispatch]
pub(crate) trait AudioSink {
    fn play(&mut self, cue: Cue) -> io::Result<()>;
}

#[enum_dispatch(AudioSink)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Audio {
    TerminalBell,
    Silent,
}

impl Audio {
    pub(crate) fn new(enabled: bool) -> Audio {
        if enabled {
            Audio::from(TerminalBell)
        } else {
            Audio::from(Silent)
        }
    }

    /// Play `cue`.  Playback is fire-and-forget: failures are logged and
    /// otherwise ignored.
    pub(crate) fn cue(&mut self, cue: Cue) {
        play_cue(self, cue);
    }
}

fn play_cue<S: AudioSink>(sink: &mut S, cue: Cue) {
    if let Err(e) = sink.play(cue) {
        warn!(?cue, error = %e, "Failed to play sound");
    }
}

/// Rings the terminal bell: once for a chomp, twice for a power-up
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        let bells: &[u8] = match cue {
            Cue::Chomp => b"\x07",
            Cue::PowerUp => b"\x07\x07",
        };
        let mut out = io::stdout().lock();
        out.write_all(bells)?;
        out.flush()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}
