//! Layer switchboard
//!
//! The switchboard owns the layers and decides what every input means. The
//! encoder is shared between two jobs: in [`EncoderMode::AdjustBrightness`]
//! it steps the LED brightness, in [`EncoderMode::SwitchLayer`] it walks
//! through the layers. Pressing the encoder flips between the two, and the
//! title line carries a trailing `*` while layers are being switched.
//!
//! Everything happens inside the poll calls on one thread, so a layer switch
//! always finishes repainting the keys and the display before the next key
//! event is looked up.

use heapless::{String, Vec};

use crate::binding::{KeyBinding, Layer};
use crate::config::{
    SwitchboardConfig, BLANK_LABEL, KEY_COLS, KEY_COUNT, KEY_ROWS, LABEL_WIDTH, LINE_CAPACITY, MAX_LAYERS,
    SWITCH_LAYER_MARKER, TITLE_WIDTH,
};
use crate::error::Error;
use crate::sink::{DeckSink, InputSource};
use crate::types::{EncoderMode, Rgb};

/// One line of display text.
pub type Line = String<LINE_CAPACITY>;

pub struct Switchboard<const N: usize = MAX_LAYERS> {
    layers: Vec<Layer, N>,
    active: usize,
    mode: EncoderMode,
    prev_encoder_position: i32,
    /// Brightness in hundredths, so stepping never drifts.
    brightness: u8,
    brightness_step: u8,
    title: Line,
    started: bool,
}

impl<const N: usize> Switchboard<N> {
    pub fn new(config: SwitchboardConfig) -> Self {
        Self {
            layers: Vec::new(),
            active: 0,
            mode: EncoderMode::AdjustBrightness,
            prev_encoder_position: 0,
            brightness: hundredths(config.default_brightness),
            brightness_step: hundredths(config.brightness_step),
            title: Line::new(),
            started: false,
        }
    }

    /// Append a layer. Meant for setup, before [`Switchboard::start`].
    pub fn add_layer(&mut self, layer: Layer) -> Result<(), Error> {
        if self.started {
            warn!("Layer {} added after start", layer.name());
        }
        self.layers.push(layer).map_err(|layer| {
            error!("No room for layer {} ({} max)", layer.name(), N);
            Error::TooManyLayers
        })
    }

    /// Select the first layer and paint it.
    ///
    /// Encoder tracking starts from the current reading so the first poll does
    /// not see a movement that never happened.
    pub fn start<I, S>(&mut self, io: &mut I, sink: &mut S) -> Result<(), Error>
    where
        I: InputSource + ?Sized,
        S: DeckSink,
    {
        if self.layers.is_empty() {
            error!("No layers were configured, add at least one before starting");
            return Err(Error::NoLayersConfigured);
        }

        sink.set_brightness(self.brightness());
        self.prev_encoder_position = io.read_encoder_position();
        self.activate(0, io, sink);
        self.started = true;

        info!(
            "Switchboard started with {} layer(s), brightness {}",
            self.layers.len(),
            self.brightness
        );
        Ok(())
    }

    /// Handle the encoder switch and rotation for one tick.
    pub fn poll_encoder<I, S>(&mut self, io: &mut I, sink: &mut S)
    where
        I: InputSource + ?Sized,
        S: DeckSink,
    {
        if !self.started {
            trace!("Encoder poll before start ignored");
            return;
        }

        if io.read_encoder_button_pressed() {
            self.mode = self.mode.toggled();
            match self.mode {
                EncoderMode::SwitchLayer => {
                    if !self.title.ends_with(SWITCH_LAYER_MARKER) {
                        let _ = self.title.push(SWITCH_LAYER_MARKER);
                    }
                }
                EncoderMode::AdjustBrightness => {
                    if self.title.ends_with(SWITCH_LAYER_MARKER) {
                        self.title.pop();
                    }
                }
            }
            sink.set_display_line(0, &self.title);
            debug!("Encoder mode: {:?}", self.mode);
            // A press never doubles as rotation in the same tick
            return;
        }

        let position = io.read_encoder_position();
        if position == self.prev_encoder_position {
            return;
        }

        let forward = position > self.prev_encoder_position;
        match self.mode {
            EncoderMode::SwitchLayer => self.step_layer(forward, io, sink),
            EncoderMode::AdjustBrightness => self.step_brightness(forward, sink),
        }

        self.prev_encoder_position = position;
    }

    /// Dispatch at most one key event.
    pub fn poll_keys<I, S>(&mut self, io: &mut I, sink: &mut S)
    where
        I: InputSource + ?Sized,
        S: DeckSink,
    {
        if !self.started {
            trace!("Key poll before start ignored");
            return;
        }

        let Some(event) = io.read_key_event() else {
            return;
        };
        if !event.pressed {
            return;
        }

        let layer = &self.layers[self.active];
        match layer.binding(event.slot).and_then(KeyBinding::action) {
            Some(action) => {
                debug!("Key {} pressed on layer {}", event.slot, self.active);
                action.invoke(event.slot, sink);
            }
            None => trace!("Key {} has no action on layer {}", event.slot, self.active),
        }
    }

    /// One pass of the main loop: encoder, keys, then a single flush.
    pub fn tick<I, S>(&mut self, io: &mut I, sink: &mut S)
    where
        I: InputSource + ?Sized,
        S: DeckSink,
    {
        if !self.started {
            trace!("Tick before start ignored");
            return;
        }
        self.poll_encoder(io, sink);
        self.poll_keys(io, sink);
        sink.flush_display();
        sink.flush_lights();
    }

    /// Make `index` the active layer and repaint. Returns false if there is no
    /// such layer.
    pub fn activate_layer<I, S>(&mut self, index: usize, io: &mut I, sink: &mut S) -> bool
    where
        I: InputSource + ?Sized,
        S: DeckSink,
    {
        if index >= self.layers.len() {
            warn!("No layer {} to activate", index);
            return false;
        }
        self.activate(index, io, sink);
        true
    }

    pub fn active_layer_index(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layers.get(self.active)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn encoder_mode(&self) -> EncoderMode {
        self.mode
    }

    pub fn brightness(&self) -> f32 {
        f32::from(self.brightness) / 100.0
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn step_layer<I, S>(&mut self, forward: bool, io: &mut I, sink: &mut S)
    where
        I: InputSource + ?Sized,
        S: DeckSink,
    {
        let count = self.layers.len();
        if count == 1 {
            trace!("Single layer, ignoring encoder");
            return;
        }

        let target = if forward {
            Some(self.active + 1)
        } else {
            self.active.checked_sub(1)
        };

        match target {
            Some(index) if index < count => self.activate(index, io, sink),
            _ => trace!("Already at layer {} of {}", self.active, count),
        }
    }

    fn step_brightness<S: DeckSink>(&mut self, up: bool, sink: &mut S) {
        let next = if up {
            self.brightness
                .checked_add(self.brightness_step)
                .filter(|level| *level <= 100)
        } else {
            self.brightness.checked_sub(self.brightness_step)
        };

        // A step that would overshoot is dropped, not clamped to the limit
        match next {
            Some(level) => {
                self.brightness = level;
                sink.set_brightness(self.brightness());
                debug!("Brightness {}", level);
            }
            None => trace!("Brightness at limit ({})", self.brightness),
        }
    }

    fn activate<I, S>(&mut self, index: usize, io: &mut I, sink: &mut S)
    where
        I: InputSource + ?Sized,
        S: DeckSink,
    {
        // Nothing held on the old layer may outlive it
        io.reset_keys();
        sink.release_all();
        sink.stop_tone();

        self.active = index;
        let layer = &self.layers[index];

        self.title = centered(layer.name(), TITLE_WIDTH);
        if self.mode == EncoderMode::SwitchLayer {
            let _ = self.title.push(SWITCH_LAYER_MARKER);
        }
        sink.set_display_line(0, &self.title);

        let mut rows: [Line; KEY_ROWS] = Default::default();
        for slot in 0..KEY_COUNT {
            let (label, color) = match layer.binding(slot) {
                Some(binding) if !binding.label().is_empty() => (binding.label(), binding.color()),
                _ => (BLANK_LABEL, Rgb::BLACK),
            };
            sink.set_slot_color(slot, color);
            let _ = rows[slot / KEY_COLS].push_str(&centered(label, LABEL_WIDTH));
        }

        for (row, text) in rows.iter().enumerate() {
            sink.set_display_line(row + 1, text);
        }

        info!("Layer {} active: {}", index, layer.name());
    }
}

impl<const N: usize> Default for Switchboard<N> {
    fn default() -> Self {
        Self::new(SwitchboardConfig::default())
    }
}

/// Clamp to `0.0..=1.0` and round to hundredths.
fn hundredths(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 100.0 + 0.5) as u8
}

/// Truncate `text` to `width` characters and center it. Odd padding puts the
/// extra space on the right.
pub fn centered(text: &str, width: usize) -> Line {
    let shown = text.chars().count().min(width);
    let pad = width - shown;
    let left = pad / 2;

    let mut line = Line::new();
    let fits = (0..left).all(|_| line.push(' ').is_ok())
        && text.chars().take(shown).all(|c| line.push(c).is_ok())
        && (0..pad - left).all(|_| line.push(' ').is_ok());
    if !fits {
        warn!("Text {} cut short to fit a display line", text);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_matches_label_field() {
        assert_eq!(centered("X", 7).as_str(), "   X   ");
        assert_eq!(centered("ESC", 7).as_str(), "  ESC  ");
        assert_eq!(centered("KP 7", 7).as_str(), " KP 7  ");
        assert_eq!(centered("", 7).as_str(), "       ");
        assert_eq!(centered("TOOLONGLABEL", 7).as_str(), "TOOLONG");
    }

    #[test]
    fn title_is_truncated_to_twenty() {
        let line = centered("Layer 0 - Primary Media Keys", TITLE_WIDTH);
        assert_eq!(line.as_str(), "Layer 0 - Primary Me");
        assert_eq!(centered("Numpad", TITLE_WIDTH).len(), TITLE_WIDTH);
    }

    #[test]
    fn wide_characters_fit_title_and_marker() {
        let name = "\u{1F3B9}".repeat(TITLE_WIDTH + 5);
        let mut title = centered(&name, TITLE_WIDTH);
        assert_eq!(title.chars().count(), TITLE_WIDTH);
        assert!(title.push(SWITCH_LAYER_MARKER).is_ok());

        let label = centered("\u{1F3B9}\u{1F3B9}\u{1F3B9}\u{1F3B9}\u{1F3B9}\u{1F3B9}\u{1F3B9}", LABEL_WIDTH);
        let mut row = Line::new();
        for _ in 0..KEY_COLS {
            assert!(row.push_str(&label).is_ok());
        }
    }

    #[test]
    fn brightness_config_rounds_to_hundredths() {
        assert_eq!(hundredths(0.5), 50);
        assert_eq!(hundredths(0.05), 5);
        assert_eq!(hundredths(0.333), 33);
        assert_eq!(hundredths(1.7), 100);
        assert_eq!(hundredths(-0.2), 0);
        assert_eq!(hundredths(f32::NAN), 0);
    }
}
