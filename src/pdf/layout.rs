use super::canvas::{Canvas, Rect};
use super::fonts::Font;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub leading: f32,
}

impl TextStyle {
    /// 单行字符串默认行距为 1.2 倍字号
    pub fn plain(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            leading: size * 1.2,
        }
    }
}

/// 按宽度折行; 单词超宽时按字符拆开
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if font.string_width(word, size) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunk = String::new();
            for ch in word.chars() {
                chunk.push(ch);
                if chunk.chars().count() > 1 && font.string_width(&chunk, size) > max_width {
                    chunk.pop();
                    lines.push(std::mem::take(&mut chunk));
                    chunk.push(ch);
                }
            }
            current = chunk;
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate_width = font.string_width(&current, size)
            + font.string_width(" ", size)
            + font.string_width(word, size);
        if candidate_width <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// 自动折行的段落
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    lines: Vec<String>,
    style: TextStyle,
}

impl Paragraph {
    pub fn wrap(text: &str, style: TextStyle, max_width: f32) -> Self {
        Self {
            lines: wrap_text(text, style.font, style.size, max_width),
            style,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.style.leading
    }

    /// 以段落底边 y 定位
    pub fn draw(&self, canvas: &mut Canvas, x: f32, y: f32) {
        self.draw_lines(canvas, y + self.height(), |_| x);
    }

    fn draw_lines(&self, canvas: &mut Canvas, top: f32, x_for: impl Fn(&str) -> f32) {
        let TextStyle { font, size, leading } = self.style;
        for (idx, line) in self.lines.iter().enumerate() {
            let baseline = top - size - idx as f32 * leading;
            canvas.draw_string(font, size, x_for(line), baseline, line);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// 单元格内容: 单行文本或自动折行文本
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    Flow(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub grid_width: f32,
    pub header_gray: f32,
    pub header: TextStyle,
    pub body: TextStyle,
    pub flow: TextStyle,
    /// 数据行各列的水平对齐; 折行单元格始终左对齐
    pub body_align: Vec<Align>,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

/// 不折行的文本 (仅按换行符分行)
fn single_line(text: &str, style: TextStyle) -> Paragraph {
    Paragraph {
        lines: text.lines().map(str::to_string).collect(),
        style,
    }
}

#[derive(Debug, Clone)]
struct Row {
    cells: Vec<Paragraph>,
    aligns: Vec<Align>,
    height: f32,
    header: bool,
}

/// 固定列宽表格; 行高由折行后的内容决定
#[derive(Debug, Clone)]
pub struct Table {
    col_widths: Vec<f32>,
    style: TableStyle,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(col_widths: Vec<f32>, style: TableStyle) -> Self {
        Self {
            col_widths,
            style,
            rows: Vec::new(),
        }
    }

    pub fn push_header<S: AsRef<str>>(&mut self, labels: &[S]) {
        let cells = labels
            .iter()
            .zip(&self.col_widths)
            .map(|(label, _)| single_line(label.as_ref(), self.style.header))
            .collect();
        let aligns = vec![Align::Left; self.col_widths.len()];
        self.push(cells, aligns, true);
    }

    pub fn push_row(&mut self, contents: Vec<CellContent>) {
        let mut cells = Vec::with_capacity(contents.len());
        let mut aligns = Vec::with_capacity(contents.len());
        for (idx, (content, width)) in contents.iter().zip(&self.col_widths).enumerate() {
            let inner = width - self.style.padding_left - self.style.padding_right;
            match content {
                CellContent::Text(text) => {
                    cells.push(single_line(text, self.style.body));
                    aligns.push(self.style.body_align.get(idx).copied().unwrap_or(Align::Left));
                }
                CellContent::Flow(text) => {
                    cells.push(Paragraph::wrap(text, self.style.flow, inner));
                    aligns.push(Align::Left);
                }
            }
        }
        self.push(cells, aligns, false);
    }

    fn push(&mut self, cells: Vec<Paragraph>, aligns: Vec<Align>, header: bool) {
        let content = cells.iter().map(Paragraph::height).fold(0.0f32, f32::max);
        let height = content + self.style.padding_top + self.style.padding_bottom;
        self.rows.push(Row {
            cells,
            aligns,
            height,
            header,
        });
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_heights(&self) -> Vec<f32> {
        self.rows.iter().map(|r| r.height).collect()
    }

    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    pub fn height(&self) -> f32 {
        self.rows.iter().map(|r| r.height).sum()
    }

    /// 以表格左下角 (x, y) 定位绘制
    pub fn draw(&self, canvas: &mut Canvas, x: f32, y: f32) {
        let style = &self.style;
        let top = y + self.height();
        let width = self.width();

        // 1. 表头底色
        let mut row_top = top;
        for row in &self.rows {
            if row.header {
                canvas.fill_rect(
                    Rect {
                        x,
                        y: row_top - row.height,
                        width,
                        height: row.height,
                    },
                    style.header_gray,
                );
            }
            row_top -= row.height;
        }

        // 2. 单元格文本 (垂直居中)
        let mut row_top = top;
        for row in &self.rows {
            let row_bottom = row_top - row.height;
            let mut cell_x = x;
            for ((cell, align), col_width) in row.cells.iter().zip(&row.aligns).zip(&self.col_widths) {
                let inner_height = row.height - style.padding_top - style.padding_bottom;
                let block_top = row_bottom + style.padding_bottom + (inner_height + cell.height()) / 2.0;
                let left = cell_x + style.padding_left;
                let right = cell_x + col_width - style.padding_right;
                let font = cell.style.font;
                let size = cell.style.size;
                cell.draw_lines(canvas, block_top, |line| {
                    let text_width = font.string_width(line, size);
                    match align {
                        Align::Left => left,
                        Align::Right => right - text_width,
                        Align::Center => left + (right - left - text_width) / 2.0,
                    }
                });
                cell_x += col_width;
            }
            row_top = row_bottom;
        }

        // 3. 网格线
        let bottom = y;
        let mut line_y = top;
        canvas.line((x, line_y), (x + width, line_y), style.grid_width);
        for row in &self.rows {
            line_y -= row.height;
            canvas.line((x, line_y), (x + width, line_y), style.grid_width);
        }
        let mut line_x = x;
        canvas.line((line_x, top), (line_x, bottom), style.grid_width);
        for col_width in &self.col_widths {
            line_x += col_width;
            canvas.line((line_x, top), (line_x, bottom), style.grid_width);
        }
    }
}
