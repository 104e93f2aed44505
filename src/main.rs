use memsim::driver;

fn main() -> anyhow::Result<()> {
    driver::run_simulator()
}
