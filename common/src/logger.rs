use log::{LevelFilter, Metadata, Record};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::time::Instant;

/// A logger that logs to a file and stdout
pub struct MyLog {
    start: Instant,
    log_file: Option<Mutex<BufWriter<File>>>,
}

impl MyLog {
    fn new() -> Self {
        let log_file;
        #[cfg(not(debug_assertions))]
        {
            let _ = std::fs::create_dir("logs");
            use std::time::SystemTime;
            log_file = File::create(format!(
                "logs/log_{}.log",
                SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .expect("what is this, an IBM mainframe?")
                    .as_micros()
            ))
            .ok()
            .map(|f| Mutex::new(BufWriter::new(f)));
        }

        #[cfg(debug_assertions)]
        {
            log_file = None;
        }

        Self {
            start: Instant::now(),
            log_file,
        }
    }

    pub fn init() {
        let leaked = Box::leak(Box::new(MyLog::new()));
        crate::unwrap_orr!(log::set_logger(leaked), return);
        log::set_max_level(LevelFilter::Debug);
        log_panics::init();
    }
}

macro_rules! write_log_stdout {
    ($file:expr, $($arg:tt)*) => {
        let _ = println!($($arg)*);

        if let Some(ref m) = $file {
            let mut bw = m.lock().unwrap();
            let _ = writeln!(bw, $($arg)*);
            let _ = bw.flush();
        }
    }
}

impl log::Log for MyLog {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let time = self.start.elapsed();
        let module = record.module_path().unwrap_or_default();

        write_log_stdout!(
            self.log_file,
            "[{:9.3} {:5} {}] {}",
            time.as_secs_f32(),
            record.level(),
            module,
            record.args()
        );
    }

    fn flush(&self) {
        if let Some(ref m) = self.log_file {
            let _ = m.lock().unwrap().flush();
        }
    }
}
