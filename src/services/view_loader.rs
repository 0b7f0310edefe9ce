// ============================================================================
// VIEW LOADER - Carga todos los ficheros que necesita una vista
// ============================================================================
// Orden del manifest (vendor, common, chunk propio). El manifest se pide una
// sola vez: las cargas que llegan mientras está en vuelo esperan a la misma
// petición. Si falla no se cachea y el siguiente intento lo vuelve a pedir.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use crate::models::{ChunkError, ChunkManifest, ViewId};
use crate::services::{ChunkLoader, ManifestSource};

type ManifestFetch = Shared<LocalBoxFuture<'static, Result<Rc<ChunkManifest>, ChunkError>>>;

pub struct ViewLoader<L, M> {
    loader: L,
    source: M,
    manifest: RefCell<Option<ManifestFetch>>,
    loaded: RefCell<HashSet<String>>,
}

impl<L, M> ViewLoader<L, M>
where
    L: ChunkLoader,
    M: ManifestSource + Clone + 'static,
{
    pub fn new(loader: L, source: M) -> Self {
        Self {
            loader,
            source,
            manifest: RefCell::new(None),
            loaded: RefCell::new(HashSet::new()),
        }
    }

    fn manifest_fetch(&self) -> ManifestFetch {
        if let Some(fetch) = self.manifest.borrow().as_ref() {
            return fetch.clone();
        }
        let source = self.source.clone();
        let fetch = async move {
            let manifest = source.fetch_manifest().await?;
            log::info!("📄 [MANIFEST] {} chunks asíncronos", manifest.chunks.len());
            Ok::<_, ChunkError>(Rc::new(manifest))
        }
        .boxed_local()
        .shared();
        *self.manifest.borrow_mut() = Some(fetch.clone());
        fetch
    }

    pub async fn manifest(&self) -> Result<Rc<ChunkManifest>, ChunkError> {
        let fetch = self.manifest_fetch();
        let result = fetch.clone().await;
        if result.is_err() {
            let mut slot = self.manifest.borrow_mut();
            // Solo se descarta la petición fallida, no una posterior
            if slot.as_ref().map_or(false, |current| current.ptr_eq(&fetch)) {
                *slot = None;
            }
        }
        result
    }

    pub fn is_loaded(&self, file: &str) -> bool {
        self.loaded.borrow().contains(file)
    }

    pub async fn load_view(&self, view: ViewId) -> Result<(), ChunkError> {
        let manifest = self.manifest().await?;
        for file in manifest.pending_files(view.chunk_name())? {
            if self.is_loaded(file) {
                continue;
            }
            let url = manifest.url_for(file);
            log::debug!("[LOADER] {} <- {}", view, url);
            self.loader.load_file(&url).await?;
            self.loaded.borrow_mut().insert(file.to_string());
        }

        if !self.loader.is_registered(view.chunk_name()) {
            return Err(ChunkError::Unregistered(view.chunk_name().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct FakeLoader {
        requested: RefCell<Vec<String>>,
        failing: RefCell<HashSet<String>>,
        /// Cargan bien pero no registran su chunk
        silent: RefCell<HashSet<String>>,
        registered: RefCell<HashSet<String>>,
    }

    impl ChunkLoader for &FakeLoader {
        async fn load_file(&self, url: &str) -> Result<(), ChunkError> {
            self.requested.borrow_mut().push(url.to_string());
            if self.failing.borrow().contains(url) {
                return Err(ChunkError::Script { url: url.to_string() });
            }
            if !self.silent.borrow().contains(url) {
                let chunk = url.trim_start_matches('/').trim_end_matches(".js");
                self.registered.borrow_mut().insert(chunk.to_string());
            }
            Ok(())
        }

        fn is_registered(&self, chunk: &str) -> bool {
            self.registered.borrow().contains(chunk)
        }
    }

    struct FakeSource {
        calls: Cell<u32>,
        fail_first: bool,
    }

    impl ManifestSource for Rc<FakeSource> {
        async fn fetch_manifest(&self) -> Result<ChunkManifest, ChunkError> {
            self.calls.set(self.calls.get() + 1);
            let call = self.calls.get();
            tokio::task::yield_now().await;
            if self.fail_first && call == 1 {
                return Err(ChunkError::Manifest("HTTP 503".into()));
            }
            let files = |own: &str| {
                vec!["vendor.js".to_string(), "common.js".to_string(), format!("{}.js", own)]
            };
            let mut chunks = BTreeMap::new();
            for view in ViewId::ALL {
                chunks.insert(view.chunk_name().to_string(), files(view.chunk_name()));
            }
            Ok(ChunkManifest {
                public_path: "/".into(),
                initial: vec!["vendor.js".into(), "main.js".into()],
                chunks,
            })
        }
    }

    fn source(fail_first: bool) -> Rc<FakeSource> {
        Rc::new(FakeSource { calls: Cell::new(0), fail_first })
    }

    #[tokio::test]
    async fn shared_files_are_loaded_once() {
        let fake = FakeLoader::default();
        let src = source(false);
        let loader = ViewLoader::new(&fake, src.clone());

        loader.load_view(ViewId::About).await.unwrap();
        loader.load_view(ViewId::Contact).await.unwrap();

        assert_eq!(
            *fake.requested.borrow(),
            vec!["/common.js", "/about.component.js", "/contact.component.js"]
        );
        assert_eq!(src.calls.get(), 1);
    }

    #[tokio::test]
    async fn views_requested_together_share_the_manifest_request() {
        let fake = FakeLoader::default();
        let src = source(false);
        let loader = ViewLoader::new(&fake, src.clone());

        let (about, contact) = tokio::join!(
            loader.load_view(ViewId::About),
            loader.load_view(ViewId::Contact)
        );
        about.unwrap();
        contact.unwrap();
        assert_eq!(src.calls.get(), 1);
    }

    #[tokio::test]
    async fn failed_file_is_requested_again_on_retry() {
        let fake = FakeLoader::default();
        fake.failing.borrow_mut().insert("/home.component.js".into());
        let loader = ViewLoader::new(&fake, source(false));

        let err = loader.load_view(ViewId::Home).await.unwrap_err();
        assert_eq!(err, ChunkError::Script { url: "/home.component.js".into() });
        assert!(loader.is_loaded("common.js"));

        fake.failing.borrow_mut().clear();
        loader.load_view(ViewId::Home).await.unwrap();
        assert_eq!(
            *fake.requested.borrow(),
            vec!["/common.js", "/home.component.js", "/home.component.js"]
        );
    }

    #[tokio::test]
    async fn manifest_failure_is_not_cached() {
        let fake = FakeLoader::default();
        let src = source(true);
        let loader = ViewLoader::new(&fake, src.clone());

        assert!(matches!(
            loader.load_view(ViewId::Home).await,
            Err(ChunkError::Manifest(_))
        ));
        loader.load_view(ViewId::Home).await.unwrap();
        assert_eq!(src.calls.get(), 2);
    }

    #[tokio::test]
    async fn chunk_that_does_not_register_fails_the_view() {
        let fake = FakeLoader::default();
        fake.silent.borrow_mut().insert("/contact.component.js".into());
        let loader = ViewLoader::new(&fake, source(false));

        assert_eq!(
            loader.load_view(ViewId::Contact).await,
            Err(ChunkError::Unregistered("contact.component".into()))
        );
    }
}
