//! Line-oriented user input port trait.

pub trait PromptPort {
    /// Show `message` and read one line without its trailing newline.
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, message: &str) -> std::io::Result<Option<String>>;
}

impl<P: PromptPort + ?Sized> PromptPort for &mut P {
    fn read_line(&mut self, message: &str) -> std::io::Result<Option<String>> {
        (**self).read_line(message)
    }
}
