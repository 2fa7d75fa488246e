//! gRPC gateway for the `auth.Auth` service.
//!
//! Validates each request, calls the `Auth` capability, and maps `AuthError`
//! onto gRPC status codes. Internal failures are logged here and reported to
//! the client with a fixed message; expected outcomes are warned about by the
//! auth service, so the gateway only traces them at debug.

use super::proto::auth_server::{Auth as AuthRpc, AuthServer};
use super::proto::{
    IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
use super::validation::{validate_is_admin, validate_login, validate_register};
use crate::domain::AuthError;
use crate::ports::Auth;
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::{debug, error};

const INTERNAL_ERROR: &str = "internal error";

/// Gateway adapter. Holds only a shared handle to the capability, so one
/// instance serves all concurrent calls.
#[derive(Clone)]
pub struct AuthGateway {
    auth: Arc<dyn Auth>,
}

impl AuthGateway {
    pub fn new(auth: Arc<dyn Auth>) -> Self {
        Self { auth }
    }

    /// Wrap the gateway in the generated tonic service for mounting on a server.
    pub fn into_service(self) -> AuthServer<Self> {
        AuthServer::new(self)
    }
}

#[tonic::async_trait]
impl AuthRpc for AuthGateway {
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();
        validate_login(&req).inspect_err(|s| debug!(reason = s.message(), "login rejected"))?;

        let token = self
            .auth
            .login(&req.email, &req.password, req.app_id)
            .await
            .map_err(|e| match e {
                AuthError::InvalidCredentials => {
                    debug!(app_id = req.app_id, "login: invalid credentials");
                    Status::invalid_argument("")
                }
                other => internal("login", &other),
            })?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();
        validate_register(&req)
            .inspect_err(|s| debug!(reason = s.message(), "register rejected"))?;

        let user_id = self
            .auth
            .register_new_user(&req.email, &req.password)
            .await
            .map_err(|e| match e {
                AuthError::UserAlreadyExists => {
                    debug!("register: user already exists");
                    Status::already_exists("user already exist")
                }
                other => internal("register", &other),
            })?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let req = request.into_inner();
        validate_is_admin(&req)
            .inspect_err(|s| debug!(reason = s.message(), "is_admin rejected"))?;

        let is_admin = self
            .auth
            .is_admin(req.user_id)
            .await
            .map_err(|e| match e {
                AuthError::UserNotFound => {
                    debug!(user_id = req.user_id, "is_admin: user not found");
                    Status::not_found("user not found")
                }
                other => internal("is_admin", &other),
            })?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}

/// Collapse an unmapped domain error. The cause goes to the log, never to the client.
fn internal(op: &'static str, err: &AuthError) -> Status {
    error!(op, error = %err, "auth call failed");
    Status::internal(INTERNAL_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tonic::Code;

    /// Canned-answer capability that counts how often it was reached.
    struct StubAuth {
        login: Result<String, AuthError>,
        register: Result<i64, AuthError>,
        is_admin: Result<bool, AuthError>,
        calls: AtomicUsize,
    }

    impl StubAuth {
        fn ok() -> Self {
            Self {
                login: Ok("tok123".into()),
                register: Ok(7),
                is_admin: Ok(true),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: AuthError) -> Self {
            Self {
                login: Err(err.clone()),
                register: Err(err.clone()),
                is_admin: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Auth for StubAuth {
        async fn login(&self, _: &str, _: &str, _: i32) -> Result<String, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.login.clone()
        }

        async fn register_new_user(&self, _: &str, _: &str) -> Result<i64, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.register.clone()
        }

        async fn is_admin(&self, _: i64) -> Result<bool, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.is_admin.clone()
        }
    }

    fn gateway(stub: StubAuth) -> (AuthGateway, Arc<StubAuth>) {
        let stub = Arc::new(stub);
        (AuthGateway::new(Arc::clone(&stub) as Arc<dyn Auth>), stub)
    }

    fn login_req(email: &str, password: &str, app_id: i32) -> Request<LoginRequest> {
        Request::new(LoginRequest {
            email: email.into(),
            password: password.into(),
            app_id,
        })
    }

    fn register_req(email: &str, password: &str) -> Request<RegisterRequest> {
        Request::new(RegisterRequest {
            email: email.into(),
            password: password.into(),
        })
    }

    #[tokio::test]
    async fn test_login_returns_token_verbatim() {
        let (gw, stub) = gateway(StubAuth::ok());
        let resp = gw.login(login_req("a@b.com", "pw", 1)).await.unwrap();
        assert_eq!(resp.into_inner().token, "tok123");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_login_never_reaches_auth() {
        let (gw, stub) = gateway(StubAuth::ok());
        for req in [
            login_req("", "pw", 1),
            login_req("a@b.com", "", 1),
            login_req("a@b.com", "pw", 0),
        ] {
            let status = gw.login(req).await.unwrap_err();
            assert_eq!(status.code(), Code::InvalidArgument);
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_maps_to_empty_invalid_argument() {
        let (gw, _) = gateway(StubAuth::failing(AuthError::InvalidCredentials));
        let status = gw.login(login_req("a@b.com", "pw", 1)).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "");
    }

    #[tokio::test]
    async fn test_login_other_error_is_internal() {
        let (gw, _) = gateway(StubAuth::failing(AuthError::Other("db down".into())));
        let status = gw.login(login_req("a@b.com", "pw", 1)).await.unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }

    #[tokio::test]
    async fn test_register_returns_user_id() {
        let (gw, _) = gateway(StubAuth::ok());
        let resp = gw.register(register_req("a@b.com", "pw")).await.unwrap();
        assert_eq!(resp.into_inner().user_id, 7);
    }

    #[tokio::test]
    async fn test_register_empty_email_rejected_before_auth() {
        let (gw, stub) = gateway(StubAuth::ok());
        let status = gw.register(register_req("", "pw")).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "invalid email");

        let status = gw.register(register_req("a@b.com", "")).await.unwrap_err();
        assert_eq!(status.message(), "invalid password");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_register_error_mapping() {
        let (gw, _) = gateway(StubAuth::failing(AuthError::UserAlreadyExists));
        let status = gw.register(register_req("a@b.com", "pw")).await.unwrap_err();
        assert_eq!(status.code(), Code::AlreadyExists);
        assert_eq!(status.message(), "user already exist");

        // A category owned by another operation is still unknown here.
        let (gw, _) = gateway(StubAuth::failing(AuthError::UserNotFound));
        let status = gw.register(register_req("a@b.com", "pw")).await.unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }

    #[tokio::test]
    async fn test_is_admin_passthrough() {
        let (gw, _) = gateway(StubAuth::ok());
        let resp = gw
            .is_admin(Request::new(IsAdminRequest { user_id: 42 }))
            .await
            .unwrap();
        assert!(resp.into_inner().is_admin);
    }

    #[tokio::test]
    async fn test_is_admin_zero_user_id_rejected_before_auth() {
        let (gw, stub) = gateway(StubAuth::ok());
        let status = gw
            .is_admin(Request::new(IsAdminRequest { user_id: 0 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "invalid user_id");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_is_admin_error_mapping() {
        let (gw, _) = gateway(StubAuth::failing(AuthError::UserNotFound));
        let status = gw
            .is_admin(Request::new(IsAdminRequest { user_id: 42 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "user not found");

        let (gw, _) = gateway(StubAuth::failing(AuthError::Other(
            "sqlite: disk I/O error".into(),
        )));
        let status = gw
            .is_admin(Request::new(IsAdminRequest { user_id: 42 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }

    /// Collects formatted log lines written while the guard is alive.
    #[derive(Clone, Default)]
    struct LogBuf(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuf {
        fn lines_at(&self, level: &str) -> usize {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .filter(|l| l.contains(level))
                .count()
        }
    }

    #[tokio::test]
    async fn test_expected_outcomes_are_not_warned_by_gateway() {
        let logs = LogBuf::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (gw, _) = gateway(StubAuth::failing(AuthError::InvalidCredentials));
        gw.login(login_req("a@b.com", "pw", 1)).await.unwrap_err();
        let (gw, _) = gateway(StubAuth::failing(AuthError::UserAlreadyExists));
        gw.register(register_req("a@b.com", "pw")).await.unwrap_err();
        let (gw, _) = gateway(StubAuth::failing(AuthError::UserNotFound));
        gw.is_admin(Request::new(IsAdminRequest { user_id: 42 }))
            .await
            .unwrap_err();

        assert_eq!(logs.lines_at("WARN"), 0);
        assert_eq!(logs.lines_at("DEBUG"), 3);

        // Internal failures still surface at error.
        let (gw, _) = gateway(StubAuth::failing(AuthError::Other("db down".into())));
        gw.login(login_req("a@b.com", "pw", 1)).await.unwrap_err();
        assert_eq!(logs.lines_at("ERROR"), 1);
    }
}
