use regifc::prelude::*;

register! {
    /// Command register.
    #[access(wo)]
    #[reset(0x0000_0000)]
    pub struct Cmd: u16 {
        0 => pub opcode: 6,
        8 => pub start: 1,
    }
}

fn main() {
    let cmd = Cmd::new(Cmd::RESET);
    cmd.reset().with_opcode(0x2a).with_start(1).write();
    cmd.write_raw(0x0101);
    cmd.clear();
}
