use rask_log_chunker::app;

fn main() -> anyhow::Result<()> {
    app::main()
}
