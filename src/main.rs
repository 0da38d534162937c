use std::io::Write;
use std::os::unix::io::AsRawFd;

use keymux::KeyCode;

fn main() -> anyhow::Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    let result = run();
    let _ = crossterm::terminal::disable_raw_mode();
    result
}

/// Echo every decoded key until `q` is pressed.
fn run() -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut manager = keymux::create_manager(stdin.as_raw_fd())?;
    manager.register_user_map("jk", "<Esc>")?;

    let mut out = std::io::stdout();
    write!(
        out,
        "keymux demo: keys echo as decoded, 'jk' is mapped to <Esc>, 'q' quits\r\n"
    )?;
    out.flush()?;

    loop {
        match manager.get_key()? {
            Some(key) if key == KeyCode::from_byte(b'q') => break,
            Some(key) => {
                write!(out, "{key}\r\n")?;
                out.flush()?;
            }
            None => {} // idle window elapsed, keep waiting
        }
    }

    Ok(())
}
