use anyhow::{Context, Result};
use log::debug;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::selection::Point;

/// 指针事件记录，由显示表面合成后派发给处理器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Point),
    Up(Point),
}

/// 识别的键盘命令；其余按键一律忽略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 'r'：把显示缓冲恢复成原图
    Reset,
    /// 'q'：退出交互循环
    Quit,
}

/// 指针事件的接收方，由调用方注入
pub trait PointerHandler {
    fn on_pointer(&mut self, event: PointerEvent);
}

/// minifb 窗口的包装：合成指针事件、轮询按键、刷新缓冲
pub struct Surface {
    window: Window,
    width: usize,
    height: usize,
    was_down: bool,
}

impl Surface {
    pub fn new(name: &str, width: usize, height: usize) -> Result<Self> {
        let mut window =
            Window::new(name, width, height, WindowOptions::default()).context("创建窗口失败")?;
        window.set_target_fps(60);
        Ok(Surface { window, width, height, was_down: false })
    }

    /// 每帧比较鼠标左键状态，把按下/松开沿合成为事件并派发。
    /// 坐标不裁剪也不校验，原样交给处理器
    pub fn pump(&mut self, handler: &mut impl PointerHandler) {
        let down = self.window.get_mouse_down(MouseButton::Left);
        if down == self.was_down {
            return;
        }
        self.was_down = down;
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Pass) {
            let p = (mx as i32, my as i32);
            let event = if down { PointerEvent::Down(p) } else { PointerEvent::Up(p) };
            debug!("pointer event: {:?}", event);
            handler.on_pointer(event);
        }
    }

    /// 轮询一条键盘命令；没有可识别的按键时返回 None
    pub fn poll_command(&self) -> Option<Command> {
        if self.window.is_key_pressed(Key::R, KeyRepeat::No) {
            Some(Command::Reset)
        } else if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            Some(Command::Quit)
        } else {
            None
        }
    }

    /// 把缓冲刷新到窗口，同时驱动 minifb 的内部事件泵
    pub fn show(&mut self, buffer: &[u32]) -> Result<()> {
        self.window
            .update_with_buffer(buffer, self.width, self.height)
            .context("刷新窗口失败")
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }
}
