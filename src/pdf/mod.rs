pub mod canvas;
pub mod fonts;
pub mod layout;

pub use canvas::{Canvas, Rect, Segment, TextRun};
pub use fonts::Font;
pub use layout::{Align, CellContent, Paragraph, Table, TableStyle, TextStyle};
