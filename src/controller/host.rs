/// What the preview needs from the surrounding application.
pub trait PreviewHost {
    /// Schedule one more call to `render_frame`.
    fn request_render(&mut self);
    /// An image reference finished loading (`loaded`) or failed for good.
    fn image_settled(&mut self, key: &str, loaded: bool);
    fn toggle_fullscreen(&mut self);
}

/// Host without a display that records every callback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadlessHost {
    pub render_requests: usize,
    pub settled: Vec<(String, bool)>,
    pub fullscreen_toggles: usize,
}

impl PreviewHost for HeadlessHost {
    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn image_settled(&mut self, key: &str, loaded: bool) {
        self.settled.push((key.to_owned(), loaded));
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen_toggles += 1;
    }
}
