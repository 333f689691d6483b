//! Scoped egui context.
//!
//! [`GuiContext`] owns an `egui::Context` styled from [`GuiSettings`]. The
//! context lives exactly as long as the value; there is no separate init or
//! shutdown call. Each frame is a [`GuiFrame`] guard that ends the egui pass
//! when it is finished or dropped.
//!
//! Rendering the output, fonts, and input routing belong to the embedding
//! application.

use egui::{Context, CornerRadius, FullOutput, RawInput, Vec2};

/// Style and startup options for [`GuiContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct GuiSettings {
    pub window_border: f32,
    pub frame_border: f32,
    pub scrollbar_size: f32,
    pub frame_padding: Vec2,
    pub item_spacing: Vec2,
    pub rounding: u8,
    pub dark: bool,
    /// Whether frames produce output from the start.
    pub visible: bool,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            window_border: 1.0,
            frame_border: 0.0,
            scrollbar_size: 20.0,
            frame_padding: Vec2::new(5.0, 5.0),
            item_spacing: Vec2::new(6.0, 5.0),
            rounding: 2,
            dark: true,
            visible: true,
        }
    }
}

/// An egui context with a visibility flag.
pub struct GuiContext {
    ctx: Context,
    visible: bool,
}

impl GuiContext {
    /// Create a context and apply the style from `settings`.
    pub fn new(settings: GuiSettings) -> Self {
        let ctx = Context::default();
        apply_style(&ctx, &settings);
        log::debug!("GuiContext created (visible: {})", settings.visible);
        Self {
            ctx,
            visible: settings.visible,
        }
    }

    /// Get the egui context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flip visibility, returning the new state.
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Begin a new egui pass.
    pub fn begin_frame(&self, raw_input: RawInput) -> GuiFrame<'_> {
        self.ctx.begin_pass(raw_input);
        GuiFrame {
            gui: self,
            ended: false,
        }
    }
}

impl Default for GuiContext {
    fn default() -> Self {
        Self::new(GuiSettings::default())
    }
}

impl Drop for GuiContext {
    fn drop(&mut self) {
        log::debug!("GuiContext dropped");
    }
}

impl std::fmt::Debug for GuiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiContext")
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

/// One egui pass. Ends the pass on [`end`](Self::end) or on drop.
pub struct GuiFrame<'a> {
    gui: &'a GuiContext,
    ended: bool,
}

impl GuiFrame<'_> {
    /// Context to build UI with during this frame.
    pub fn ctx(&self) -> &Context {
        &self.gui.ctx
    }

    /// End the pass. Returns the output only when the context is visible.
    pub fn end(mut self) -> Option<FullOutput> {
        self.ended = true;
        let output = self.gui.ctx.end_pass();
        self.gui.visible.then_some(output)
    }
}

impl Drop for GuiFrame<'_> {
    fn drop(&mut self) {
        if !self.ended {
            // Output discarded.
            let _ = self.gui.ctx.end_pass();
        }
    }
}

fn apply_style(ctx: &Context, settings: &GuiSettings) {
    let mut style = (*ctx.style()).clone();

    style.visuals = if settings.dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    let s = &mut style.spacing;
    s.scroll.bar_width = settings.scrollbar_size;
    s.button_padding = settings.frame_padding;
    s.item_spacing = settings.item_spacing;

    let v = &mut style.visuals;
    let radius = CornerRadius::same(settings.rounding);
    v.window_corner_radius = radius;
    v.menu_corner_radius = radius;
    v.window_stroke.width = settings.window_border;
    v.widgets.inactive.bg_stroke.width = settings.frame_border;
    for widget in [
        &mut v.widgets.noninteractive,
        &mut v.widgets.inactive,
        &mut v.widgets.hovered,
        &mut v.widgets.active,
        &mut v.widgets.open,
    ] {
        widget.corner_radius = radius;
    }

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_label(frame: &GuiFrame<'_>) {
        egui::CentralPanel::default().show(frame.ctx(), |ui| {
            ui.label("vertex formats");
        });
    }

    #[test]
    fn test_style_applied() {
        let gui = GuiContext::default();
        let style = gui.context().style();
        assert_eq!(style.spacing.scroll.bar_width, 20.0);
        assert_eq!(style.spacing.item_spacing, Vec2::new(6.0, 5.0));
        assert_eq!(style.visuals.window_stroke.width, 1.0);
        assert_eq!(style.visuals.widgets.inactive.bg_stroke.width, 0.0);
        assert_eq!(style.visuals.window_corner_radius, CornerRadius::same(2));
    }

    #[test]
    fn test_frame_output_when_visible() {
        let gui = GuiContext::default();
        let frame = gui.begin_frame(RawInput::default());
        draw_label(&frame);
        let output = frame.end();
        assert!(output.is_some());
    }

    #[test]
    fn test_hidden_frame_has_no_output() {
        let mut gui = GuiContext::default();
        assert!(!gui.toggle_visible());

        let frame = gui.begin_frame(RawInput::default());
        draw_label(&frame);
        assert!(frame.end().is_none());

        gui.set_visible(true);
        assert!(gui.is_visible());
    }

    #[test]
    fn test_dropped_frame_ends_pass() {
        let gui = GuiContext::default();
        {
            let frame = gui.begin_frame(RawInput::default());
            draw_label(&frame);
        }
        let frame = gui.begin_frame(RawInput::default());
        assert!(frame.end().is_some());
    }
}
