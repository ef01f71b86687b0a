/// UI sink that displays the primary interaction.
///
/// Display style, layout, and cursor handling are the sink's business.
pub trait PromptSink {
    fn show_prompt(&mut self, text: &str);

    fn hide_prompt(&mut self);
}
