fn main() -> anyhow::Result<()> {
    fm_workshop_lib::run()
}
