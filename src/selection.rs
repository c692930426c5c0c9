use image::RgbImage;

use crate::display::{Command, PointerEvent, PointerHandler};

/// 图像像素坐标中的点 (x, y)
pub type Point = (i32, i32);

/// 边框颜色：绿色
const OUTLINE_COLOR: u32 = 0x0000_ff00;
/// 边框线宽（像素）
const OUTLINE_THICKNESS: i32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// 矩形选区结构体，按插入顺序保存两个角点
pub struct Rectangle {
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl Rectangle {
    /// 清空旧选区并记录新的锚点
    pub fn arm(&mut self, p: Point) {
        self.start = Some(p);
        self.end = None;
    }

    /// 把角点补进第一个空位；已有两个角点时忽略
    pub fn push(&mut self, p: Point) {
        if self.start.is_none() {
            self.start = Some(p);
        } else if self.end.is_none() {
            self.end = Some(p);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// 完成选区的两个角点，保持插入顺序
    pub fn corners(&self) -> Option<(Point, Point)> {
        match (self.start, self.end) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// 已记录的角点列表
    pub fn points(&self) -> Vec<Point> {
        self.start.into_iter().chain(self.end).collect()
    }
}

/// 一次交互会话：持有选区状态、原图和显示缓冲
pub struct SelectionSession {
    rectangle: Rectangle,
    pristine: Vec<u32>,
    display: Vec<u32>,
    width: usize,
    height: usize,
}

impl SelectionSession {
    pub fn new(image: &RgbImage) -> Self {
        let pristine = pack_rgb(image);
        SelectionSession {
            rectangle: Rectangle::default(),
            display: pristine.clone(),
            pristine,
            width: image.width() as usize,
            height: image.height() as usize,
        }
    }

    /// 按下左键：丢弃旧选区，记录新的锚点。
    /// 已画到屏幕上的旧边框保留到下一次 reset
    pub fn on_pointer_down(&mut self, x: i32, y: i32) {
        self.rectangle.arm((x, y));
    }

    /// 松开左键：补上第二个角点。没按下就松开时产生单点退化选区
    pub fn on_pointer_up(&mut self, x: i32, y: i32) {
        self.rectangle.push((x, y));
    }

    /// 处理键盘命令，返回交互循环是否继续
    pub fn on_key(&mut self, command: Command) -> bool {
        match command {
            Command::Reset => {
                // 整体从原图恢复显示缓冲，已画的边框全部丢弃；选区本身不动
                self.display.copy_from_slice(&self.pristine);
                true
            }
            Command::Quit => false,
        }
    }

    /// 每帧调用一次；选区完成后把边框画进显示缓冲。
    /// 状态不变时重复调用画出相同结果
    pub fn render_tick(&mut self) -> &[u32] {
        if let Some(((ax, ay), (bx, by))) = self.rectangle.corners() {
            // 角点按插入顺序保存，画边框时才归一化
            let (x0, x1) = (ax.min(bx), ax.max(bx));
            let (y0, y1) = (ay.min(by), ay.max(by));
            let t = OUTLINE_THICKNESS;
            self.fill_span(x0, y0, x1, y0 + t - 1);
            self.fill_span(x0, y1 - t + 1, x1, y1);
            self.fill_span(x0, y0, x0 + t - 1, y1);
            self.fill_span(x1 - t + 1, y0, x1, y1);
        }
        &self.display
    }

    /// 会话结束时交出选区，不做任何校验
    pub fn finalize(self) -> Rectangle {
        self.rectangle
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    pub fn display(&self) -> &[u32] {
        &self.display
    }

    pub fn pristine(&self) -> &[u32] {
        &self.pristine
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    // 把闭区间 [x0,x1]×[y0,y1] 填成边框色，越界部分裁掉
    fn fill_span(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        if x1 < 0 || y1 < 0 || self.width == 0 || self.height == 0 {
            return;
        }
        let xa = x0.max(0) as usize;
        let ya = y0.max(0) as usize;
        let xb = (x1 as usize).min(self.width - 1);
        let yb = (y1 as usize).min(self.height - 1);
        if xa > xb || ya > yb {
            return;
        }
        for y in ya..=yb {
            let base = y * self.width;
            for x in xa..=xb {
                self.display[base + x] = OUTLINE_COLOR;
            }
        }
    }
}

impl PointerHandler for SelectionSession {
    fn on_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down((x, y)) => self.on_pointer_down(x, y),
            PointerEvent::Up((x, y)) => self.on_pointer_up(x, y),
        }
    }
}

/// 把 RGB 图像打包成 minifb 用的 0RGB 缓冲
fn pack_rgb(image: &RgbImage) -> Vec<u32> {
    image
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
        })
        .collect()
}
