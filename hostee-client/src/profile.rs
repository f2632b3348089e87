// hostee-client/src/profile.rs
// 个人资料 - 读取、编辑表单、合并写入

use shared::models::{Fields, ProfileDraft, ProfilePatch, Session, UserProfile};

use crate::client::HosteeClient;
use crate::notice::{Action, Notice};
use crate::ClientResult;

/// Value plus the notice to show when it is a fallback
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub notice: Option<Notice>,
}

impl<T> Loaded<T> {
    pub fn is_fallback(&self) -> bool {
        self.notice.is_some()
    }
}

/// Profile operations on the signed-in user's own document
///
/// The document id is always the session uid; there is no way to target
/// another user's profile.
pub struct Profiles<'a> {
    client: &'a HosteeClient,
}

impl<'a> Profiles<'a> {
    pub(crate) fn new(client: &'a HosteeClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, session: &Session) -> ClientResult<Option<Fields>> {
        let collection = &self.client.config.users_collection;
        self.client
            .bounded(
                "get_document",
                self.client
                    .documents
                    .get_document(session, collection, &session.uid),
            )
            .await
    }

    /// Profile for display; absent documents yield the placeholder profile
    pub async fn load(&self) -> ClientResult<UserProfile> {
        let session = self.client.auth.require()?;
        let profile = match self.fetch(&session).await? {
            Some(fields) => UserProfile::from_document(&fields, &session.email),
            None => {
                tracing::debug!(uid = %session.uid, "No profile document, using placeholder");
                UserProfile::placeholder(&session.email)
            }
        };
        Ok(profile)
    }

    /// Like [`Profiles::load`], but a failed read still yields a profile
    pub async fn load_or_default(&self) -> Loaded<UserProfile> {
        match self.load().await {
            Ok(value) => Loaded {
                value,
                notice: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Profile read failed, showing defaults");
                let email = self.client.auth.current().map(|s| s.email).unwrap_or_default();
                Loaded {
                    value: UserProfile::placeholder(&email),
                    notice: Some(Notice::from_error(&e, Action::LoadProfile)),
                }
            }
        }
    }

    /// Edit form prefilled from the stored document
    pub async fn draft(&self) -> ClientResult<ProfileDraft> {
        let session = self.client.auth.require()?;
        Ok(self
            .fetch(&session)
            .await?
            .map(|fields| ProfileDraft::from_document(&fields))
            .unwrap_or_default())
    }

    /// Like [`Profiles::draft`], but a failed read yields an empty form
    pub async fn draft_or_default(&self) -> Loaded<ProfileDraft> {
        match self.draft().await {
            Ok(value) => Loaded {
                value,
                notice: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Profile form read failed");
                Loaded {
                    value: ProfileDraft::default(),
                    notice: Some(Notice::from_error(&e, Action::LoadProfileForm)),
                }
            }
        }
    }

    /// Save every editable field of the form
    pub async fn save(&self, draft: &ProfileDraft) -> ClientResult<()> {
        self.apply(&draft.to_patch()).await
    }

    /// Merge-write the fields set in `patch`, plus the session email
    ///
    /// Fields not in the patch are left as stored. An empty patch makes no
    /// remote call.
    pub async fn apply(&self, patch: &ProfilePatch) -> ClientResult<()> {
        let session = self.client.auth.require()?;
        if patch.is_empty() {
            tracing::debug!(uid = %session.uid, "Empty profile patch, nothing to write");
            return Ok(());
        }

        let fields = patch.to_fields(Some(&session.email));
        let collection = &self.client.config.users_collection;
        self.client
            .bounded(
                "set_document",
                self.client
                    .documents
                    .set_document(&session, collection, &session.uid, fields, true),
            )
            .await
            .inspect_err(|e| tracing::error!(uid = %session.uid, error = %e, "Profile write failed"))?;

        tracing::info!(uid = %session.uid, "Profile updated");
        Ok(())
    }
}
