//! Charts module - Figure model and static rendering

mod figure;
mod renderer;

pub use figure::FigureModel;
pub use renderer::FigureRenderer;
