//! Minimal in-process `yt_dlp` package for offline tests.
//!
//! `YoutubeDL.download` fires one `downloading` and one `finished` event through every
//! installed hook. URLs ending in `/fail` return code 2, URLs ending in `/boom` raise.
//! Each `__exit__` records the instance's default output template in `YoutubeDL.exited`.

use pyo3::prelude::*;
use pyo3::sync::PyOnceLock;
use std::ffi::CStr;

const FAKE_YT_DLP: &CStr = cr"
import sys
import types


class DownloadCancelled(Exception):
    pass


class YoutubeDL:
    exited = []

    def __init__(self, params):
        self.params = params

    def __enter__(self):
        return self

    def __exit__(self, *exc):
        YoutubeDL.exited.append(self.params['outtmpl'].get('default'))
        return False

    def download(self, urls):
        (url,) = urls
        if url.endswith('/boom'):
            raise RuntimeError('extractor exploded')
        name = url.rsplit('/', 1)[-1]
        for hook in self.params.get('progress_hooks', []):
            hook({'status': 'downloading', '_percent_str': ' 50.0%', '_eta_str': '00:01'})
            hook({'status': 'finished', 'filename': name + '.mp4'})
        return 2 if name == 'fail' else 0


utils = types.ModuleType('yt_dlp.utils')
utils.DownloadCancelled = DownloadCancelled

version = types.ModuleType('yt_dlp.version')
version.__version__ = '2024.01.01'

yt_dlp = types.ModuleType('yt_dlp')
yt_dlp.YoutubeDL = YoutubeDL
yt_dlp.utils = utils
yt_dlp.version = version

sys.modules.update({'yt_dlp': yt_dlp, 'yt_dlp.utils': utils, 'yt_dlp.version': version})
";

static INSTALLED: PyOnceLock<()> = PyOnceLock::new();

/// Register the fake package in `sys.modules`, once per process.
pub(crate) fn install(py: Python<'_>) {
    INSTALLED.get_or_init(py, || {
        py.run(FAKE_YT_DLP, None, None)
            .expect("failed to install fake yt_dlp")
    });
}

/// Whether a `YoutubeDL` built with default template `template` has been exited.
pub(crate) fn exited(py: Python<'_>, template: &str) -> bool {
    py.import("yt_dlp")
        .and_then(|m| m.getattr("YoutubeDL")?.getattr("exited")?.contains(template))
        .expect("fake yt_dlp not installed")
}
