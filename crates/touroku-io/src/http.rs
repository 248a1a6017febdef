//! `XmlHttpRequest` plumbing with timeout, abort, and upload progress.
//!
//! `fetch` still has no upload-progress events, so requests go through
//! XHR. Each request wires onload/onerror/ontimeout/onabort handlers
//! that resolve one JS promise; the future side awaits that promise
//! and then reads status/body off the request object. Handlers are
//! torn down before returning so closures do not leak.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{BlobPropertyBag, FormData, ProgressEvent, XmlHttpRequest};

/// Bound applied to every network call. Expiry is reported as
/// [`HttpError::Timeout`], never retried automatically.
pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// Transport-level failures. Status-code handling is the caller's
/// concern; these only cover requests that never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// The timeout elapsed before the response arrived.
    #[error("Request timeout. Please try again.")]
    Timeout,

    /// DNS/connection/CORS failure; no response at all.
    #[error("Network error. Please check your connection.")]
    Network,

    /// The caller aborted via [`AbortHandle`]. Not a failure.
    #[error("request aborted")]
    Aborted,

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    Js(String),
}

impl From<JsValue> for HttpError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Cancels the in-flight request it was attached to.
///
/// Cloneable so the UI can hold it while the request future is being
/// awaited elsewhere. Aborting after completion is a no-op.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    inner: Rc<RefCell<Option<XmlHttpRequest>>>,
}

impl AbortHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the attached request, if one is still in flight.
    pub fn abort(&self) {
        if let Some(xhr) = self.inner.borrow_mut().take() {
            xhr.abort().ok();
        }
    }

    fn attach(&self, xhr: &XmlHttpRequest) {
        *self.inner.borrow_mut() = Some(xhr.clone());
    }

    fn detach(&self) {
        self.inner.borrow_mut().take();
    }
}

enum Body<'a> {
    None,
    Json(&'a str),
    Multipart(&'a FormData),
}

/// One outbound request, builder style.
pub struct HttpRequest<'a> {
    method: &'a str,
    url: &'a str,
    timeout_ms: u32,
    bearer: Option<String>,
    body: Body<'a>,
    progress: Option<Box<dyn Fn(u8)>>,
    abort: Option<AbortHandle>,
}

impl<'a> HttpRequest<'a> {
    #[must_use]
    pub const fn new(method: &'a str, url: &'a str) -> Self {
        Self {
            method,
            url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            bearer: None,
            body: Body::None,
            progress: None,
            abort: None,
        }
    }

    /// Send a JSON body (sets the content type).
    #[must_use]
    pub fn json(mut self, body: &'a str) -> Self {
        self.body = Body::Json(body);
        self
    }

    /// Send a multipart body. The browser sets the content type and
    /// boundary itself.
    #[must_use]
    pub fn multipart(mut self, form: &'a FormData) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn bearer(mut self, token: String) -> Self {
        self.bearer = Some(token);
        self
    }

    #[must_use]
    pub const fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Observe upload progress as a 0-100 percentage. Only meaningful
    /// for requests with a body.
    #[must_use]
    pub fn on_progress(mut self, callback: impl Fn(u8) + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Register the request with an abort handle.
    #[must_use]
    pub fn abort_handle(mut self, handle: AbortHandle) -> Self {
        self.abort = Some(handle);
        self
    }

    /// Send the request and await the response.
    ///
    /// # Errors
    ///
    /// [`HttpError::Timeout`] / [`HttpError::Network`] /
    /// [`HttpError::Aborted`] for requests that never completed;
    /// [`HttpError::Js`] if a browser API call fails. Non-2xx statuses
    /// are *not* errors here.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let xhr = XmlHttpRequest::new()?;
        xhr.open_with_async(self.method, self.url, true)?;
        xhr.set_timeout(self.timeout_ms);
        if let Some(token) = &self.bearer {
            xhr.set_request_header("Authorization", &format!("Bearer {token}"))?;
        }

        // One promise, resolved by whichever terminal handler fires.
        // Failures are recorded on the side rather than rejecting, so
        // the await below has a single exit path.
        let (promise, resolve) = new_promise();
        let failure = Rc::new(RefCell::new(None::<HttpError>));

        let onload = Closure::<dyn FnMut()>::new({
            let resolve = resolve.clone();
            move || {
                resolve.call0(&JsValue::NULL).ok();
            }
        });
        let onerror = terminal_handler(&resolve, &failure, HttpError::Network);
        let ontimeout = terminal_handler(&resolve, &failure, HttpError::Timeout);
        let onabort = terminal_handler(&resolve, &failure, HttpError::Aborted);

        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        xhr.set_ontimeout(Some(ontimeout.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(onabort.as_ref().unchecked_ref()));

        let onprogress = match self.progress {
            Some(callback) => {
                let closure =
                    Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
                        if event.length_computable() && event.total() > 0.0 {
                            let percent = (event.loaded() * 100.0 / event.total()).round();
                            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                            {
                                callback(percent.clamp(0.0, 100.0) as u8);
                            }
                        }
                    });
                xhr.upload()?
                    .set_onprogress(Some(closure.as_ref().unchecked_ref()));
                Some(closure)
            }
            None => None,
        };

        match self.body {
            Body::None => xhr.send()?,
            Body::Json(json) => {
                xhr.set_request_header("Content-Type", "application/json")?;
                xhr.send_with_opt_str(Some(json))?;
            }
            Body::Multipart(form) => xhr.send_with_opt_form_data(Some(form))?,
        }

        if let Some(handle) = &self.abort {
            handle.attach(&xhr);
        }

        // Keep the closures alive while we await.
        let _guards = (&onload, &onerror, &ontimeout, &onabort, &onprogress);
        wasm_bindgen_futures::JsFuture::from(promise).await.ok();

        if let Some(handle) = &self.abort {
            handle.detach();
        }
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_ontimeout(None);
        xhr.set_onabort(None);
        if onprogress.is_some() {
            xhr.upload()?.set_onprogress(None);
        }

        if let Some(err) = failure.borrow_mut().take() {
            return Err(err);
        }

        let status = xhr.status()?;
        let body = xhr.response_text()?.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}

/// Build a `Blob` from raw bytes with the given MIME type.
///
/// # Errors
///
/// [`HttpError::Js`] if Blob construction fails.
pub fn blob_from_bytes(bytes: &[u8], mime: &str) -> Result<web_sys::Blob, HttpError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);
    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    Ok(blob)
}

/// A no-argument handler that records `error` and resolves the promise.
fn terminal_handler(
    resolve: &js_sys::Function,
    failure: &Rc<RefCell<Option<HttpError>>>,
    error: HttpError,
) -> Closure<dyn FnMut()> {
    let resolve = resolve.clone();
    let failure = Rc::clone(failure);
    Closure::<dyn FnMut()>::new(move || {
        *failure.borrow_mut() = Some(error.clone());
        resolve.call0(&JsValue::NULL).ok();
    })
}

/// Create a JS Promise along with its resolve function.
fn new_promise() -> (js_sys::Promise, js_sys::Function) {
    let resolve = Rc::new(RefCell::new(None::<js_sys::Function>));
    let resolve_clone = Rc::clone(&resolve);

    let promise = js_sys::Promise::new(&mut move |res, _rej| {
        *resolve_clone.borrow_mut() = Some(res);
    });

    let resolve_fn = resolve.borrow_mut().take().unwrap_or_else(|| {
        // The Promise executor runs synchronously, so this is
        // unreachable; a throwing stand-in avoids a panic path.
        js_sys::Function::new_no_args("throw new Error('resolve not captured')")
    });

    (promise, resolve_fn)
}
