//! Instruction template wrapped around the user's prompt before it is sent
//! upstream.

/// Render the text segment of the upstream request.
///
/// The wording asks the model to use every supplied image, follow the prompt
/// exactly (in whatever language it is written) and maximize output quality.
pub fn render_instruction(prompt: &str, image_count: usize) -> String {
    format!(
        "IMPORTANT: Generate an ultra high definition, full HD quality image. \
         Follow these exact instructions: {prompt}. \n\n\
         Use these {image_count} image(s) and create output exactly as described in the prompt. \
         The prompt may be in any language including Hindi - follow it precisely. \
         Generate with maximum quality, detail, and resolution. \
         Ultra high resolution output required."
    )
}
