//! Button input trait

/// The single record button, sampled by polling.
pub trait InputSource {
    /// `true` while the button is held down.
    ///
    /// Implementations hide the electrical polarity (the board wires the
    /// button active-low).
    fn is_pressed(&mut self) -> bool;
}
