/// Fullscreen capability of the window hosting the editor
pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}

/// Enter fullscreen, or leave it when already there.
/// Returns whether the host was asked to go fullscreen.
pub fn toggle_fullscreen<F: FullscreenHost + ?Sized>(host: &mut F) -> bool {
    if host.is_fullscreen() {
        host.exit_fullscreen();
        false
    } else {
        host.request_fullscreen();
        true
    }
}
