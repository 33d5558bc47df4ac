use crate::request::QuerySession;

pub const SESSIONS: &str = "/openvidu/api/sessions";

fn with_query(path: String, qry: &QuerySession) -> String {
    match serde_html_form::to_string(qry) {
        Ok(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path,
    }
}

pub fn sessions(qry: &QuerySession) -> String {
    with_query(SESSIONS.to_string(), qry)
}

pub fn session(session: &str, qry: &QuerySession) -> String {
    with_query(format!("{}/{}", SESSIONS, session), qry)
}

pub fn connection(session: &str, connection: &str) -> String {
    format!("{}/{}/connection/{}", SESSIONS, session, connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_path() {
        assert_eq!(
            "/openvidu/api/sessions/ses_A?pendingConnections=true",
            session("ses_A", &QuerySession::with_pending())
        );
        assert_eq!(
            "/openvidu/api/sessions/ses_A",
            session("ses_A", &QuerySession::default())
        );
    }

    #[test]
    fn test_sessions_path() {
        assert_eq!(
            "/openvidu/api/sessions?pendingConnections=true",
            sessions(&QuerySession::with_pending())
        );
    }

    #[test]
    fn test_connection_path() {
        assert_eq!(
            "/openvidu/api/sessions/ses_A/connection/con_B",
            connection("ses_A", "con_B")
        );
    }
}
