//! A recording fake for the external build-tool interface.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use semver::Version;
use url::Url;

use crate::backend::{BuildTools, StepContext};

/// Fake `BuildTools` that records invocations and simulates tool effects
/// on the filesystem.
#[derive(Debug)]
pub struct FakeTools {
    calls: RefCell<Vec<String>>,
    fail_at: Option<&'static str>,
    install_headers: bool,
}

impl FakeTools {
    /// A fake whose install step also installs a header, like a complete
    /// Meson install would.
    pub fn new() -> Self {
        FakeTools {
            calls: RefCell::new(Vec::new()),
            fail_at: None,
            install_headers: true,
        }
    }

    /// Simulate an install step that installs zero headers.
    pub fn without_installed_headers(mut self) -> Self {
        self.install_headers = false;
        self
    }

    /// Fail when the named operation runs.
    pub fn failing_at(mut self, op: &'static str) -> Self {
        self.fail_at = Some(op);
        self
    }

    /// Operations invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, op: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(op.to_string());
        if self.fail_at == Some(op) {
            bail!("fake {} failure", op);
        }
        Ok(())
    }
}

impl BuildTools for FakeTools {
    fn configure(&self, ctx: &StepContext) -> Result<()> {
        self.record("configure")?;
        fs::create_dir_all(&ctx.build_dir)?;
        Ok(())
    }

    fn build_all(&self, ctx: &StepContext) -> Result<()> {
        self.record("build_all")?;
        fs::create_dir_all(&ctx.build_dir)?;
        fs::write(ctx.build_dir.join("libfossil_jellyfish.a"), b"\0")?;
        Ok(())
    }

    fn install(&self, ctx: &StepContext, destdir: &Path) -> Result<()> {
        self.record("install")?;

        let lib_dir = destdir.join("lib");
        fs::create_dir_all(&lib_dir)?;
        let built = ctx.build_dir.join("libfossil_jellyfish.a");
        if built.exists() {
            fs::copy(&built, lib_dir.join("libfossil_jellyfish.a"))?;
        }

        if self.install_headers {
            let include = destdir.join("include/fossil/ai");
            fs::create_dir_all(&include)?;
            fs::write(include.join("jellyfish.h"), "// installed by tool\n")?;
        }

        Ok(())
    }

    fn fetch_tag(&self, _url: &Url, version: &Version, dest: &Path) -> Result<()> {
        self.record("fetch_tag")?;
        fs::create_dir_all(dest)?;
        fs::write(dest.join(".tag"), format!("v{}", version))?;
        Ok(())
    }
}
