use anyhow::Result;
use log::info;

use rsgc::display::Surface;
use rsgc::selection::SelectionSession;
use rsgc::source;

// 图片路径写死，没有命令行参数
const IMAGE_PATH: &str = "fat_cat.jpg";
const WINDOW_NAME: &str = "image";

fn main() -> Result<()> {
    env_logger::init();

    let img = source::load_rgb(IMAGE_PATH)?;
    let width = img.width() as usize;
    let height = img.height() as usize;
    info!("loaded {}x{} image from {}", width, height, IMAGE_PATH);

    let mut session = SelectionSession::new(&img);
    let mut surface = Surface::new(WINDOW_NAME, width, height)?;

    while surface.is_open() {
        // 先派发指针事件，再处理按键，最后重画
        surface.pump(&mut session);
        if let Some(command) = surface.poll_command() {
            if !session.on_key(command) {
                break;
            }
        }
        surface.show(session.render_tick())?;
    }

    // 选区原样交给下游，是否退化由分割器自己判断
    println!("{:?}", session.finalize().points());
    Ok(())
}
