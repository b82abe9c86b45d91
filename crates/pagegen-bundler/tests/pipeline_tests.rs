//! End-to-end tests: compile, write, after-emit, done.

use std::fs;
use std::sync::Arc;

use parking_lot::Mutex;
use pagegen_bundler::{
    AssetTable, BuildConfiguration, Compiler, Error, HookEvent, Plugin, RawSource, SourceExt,
};
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> BuildConfiguration {
    let mut config = BuildConfiguration::default();
    config.output.path = dir.path().join("dist");
    config
}

fn compiled_output() -> AssetTable {
    let mut assets = AssetTable::new();
    assets.insert("bundle.js", RawSource::from("console.log('hello');"));
    assets
}

struct StaticAssetPlugin {
    name: &'static str,
    asset: &'static str,
    content: &'static str,
}

impl Plugin for StaticAssetPlugin {
    fn name(&self) -> std::borrow::Cow<'static, str> {
        self.name.into()
    }

    fn apply(&self, compiler: &mut Compiler) -> pagegen_bundler::Result<()> {
        let (asset, content) = (self.asset, self.content);
        compiler.hooks.emit.tap(self.name, move |compilation| {
            compilation.emit_asset(asset, RawSource::from(content));
            Ok(())
        });
        Ok(())
    }
}

#[tokio::test]
async fn run_writes_seeded_and_emitted_assets() {
    let dir = TempDir::new().unwrap();
    let mut compiler = Compiler::new(config_for(&dir));
    compiler
        .apply(&StaticAssetPlugin {
            name: "Robots",
            asset: "robots.txt",
            content: "User-agent: *",
        })
        .unwrap();

    let stats = compiler.run(compiled_output()).await.unwrap();

    let out = dir.path().join("dist");
    assert_eq!(
        fs::read_to_string(out.join("bundle.js")).unwrap(),
        "console.log('hello');"
    );
    assert_eq!(
        fs::read_to_string(out.join("robots.txt")).unwrap(),
        "User-agent: *"
    );

    let names: Vec<_> = stats.assets().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["bundle.js", "robots.txt"]);
    assert_eq!(stats.get("robots.txt").unwrap().size, "User-agent: *".len());
    assert_eq!(stats.output_path(), &out);
}

#[tokio::test]
async fn later_plugin_wins_for_same_asset() {
    let dir = TempDir::new().unwrap();
    let mut compiler = Compiler::new(config_for(&dir));
    compiler
        .apply(&StaticAssetPlugin {
            name: "First",
            asset: "index.html",
            content: "first",
        })
        .unwrap();
    compiler
        .apply(&StaticAssetPlugin {
            name: "Second",
            asset: "index.html",
            content: "second",
        })
        .unwrap();

    let stats = compiler.run(compiled_output()).await.unwrap();

    let written = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
    assert_eq!(written, "second");
    assert_eq!(stats.get("index.html").unwrap().size, "second".len());
    assert_eq!(stats.assets().len(), 2);
}

#[tokio::test]
async fn after_emit_sees_written_files_and_done_runs_last() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");
    let events: Arc<Mutex<Vec<HookEvent>>> = Arc::default();

    let mut compiler = Compiler::new(config_for(&dir));
    for event in HookEvent::ALL {
        let events = Arc::clone(&events);
        let out = out.clone();
        compiler.hooks.get_mut(event).tap("Recorder", move |_| {
            if event == HookEvent::AfterEmit {
                anyhow::ensure!(out.join("bundle.js").exists(), "not written yet");
            }
            events.lock().push(event);
            Ok(())
        });
    }

    compiler.run(compiled_output()).await.unwrap();
    assert_eq!(*events.lock(), HookEvent::ALL);
}

#[tokio::test]
async fn emit_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut compiler = Compiler::new(config_for(&dir));
    compiler
        .hooks
        .emit
        .tap("Broken", |_| anyhow::bail!("template missing"));

    let err = compiler.run(compiled_output()).await.unwrap_err();
    assert!(matches!(err, Error::Plugin { hook: HookEvent::Emit, .. }));
    assert!(!dir.path().join("dist/bundle.js").exists());
}

#[tokio::test]
async fn compile_does_not_write() {
    let dir = TempDir::new().unwrap();
    let compiler = Compiler::new(config_for(&dir));

    let compilation = compiler.compile(compiled_output()).await.unwrap();
    assert_eq!(compilation.assets().get("bundle.js").unwrap().size(), 21);
    assert!(!dir.path().join("dist").exists());
}

#[tokio::test]
async fn existing_output_is_kept_without_overwrite() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.output.overwrite = false;
    fs::create_dir_all(&config.output.path).unwrap();
    fs::write(config.output.path.join("bundle.js"), "old").unwrap();

    let compiler = Compiler::new(config);
    let err = compiler.run(compiled_output()).await.unwrap_err();
    assert!(matches!(err, Error::OutputExists(_)));
    assert_eq!(
        fs::read_to_string(dir.path().join("dist/bundle.js")).unwrap(),
        "old"
    );
}

#[tokio::test]
async fn stats_only_list_written_assets() {
    let dir = TempDir::new().unwrap();
    let mut compiler = Compiler::new(config_for(&dir));
    compiler.hooks.after_emit.tap("Late", |compilation| {
        compilation.emit_asset("late.txt", RawSource::from("too late"));
        Ok(())
    });
    compiler.hooks.done.tap_async("LateDeferred", |_, mut completion| {
        completion.emit_asset("later.txt", RawSource::from("even later"));
        completion.done();
    });

    let stats = compiler.run(compiled_output()).await.unwrap();

    let names: Vec<_> = stats.assets().iter().map(|asset| asset.name.as_str()).collect();
    assert_eq!(names, ["bundle.js"]);
    for name in ["late.txt", "later.txt"] {
        assert!(stats.get(name).is_none());
        assert!(!dir.path().join("dist").join(name).exists());
    }
}

#[tokio::test]
async fn invalid_configuration_fails_before_any_tap() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.html.filename = "../index.html".to_string();

    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let mut compiler = Compiler::new(config);
    compiler.hooks.compilation.tap("Counter", move |_| {
        *counter.lock() += 1;
        Ok(())
    });

    let err = compiler.run(compiled_output()).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err:?}");
    assert!(err.to_string().contains("html.filename"));
    assert_eq!(*calls.lock(), 0);
    assert!(!dir.path().join("dist").exists());
}
