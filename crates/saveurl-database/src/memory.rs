//! In-process implementation of every store trait.
//!
//! Used for local runs (`database.url = "memory"`) and tests. All tables
//! live behind one lock so uniqueness checks and inserts are atomic, and
//! deletes cascade the same way the PostgreSQL foreign keys do.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use saveurl_core::error::AppError;
use saveurl_core::result::AppResult;
use saveurl_core::types::{CustomEntryId, GroupId, LinkId, MemberId, UserId};
use saveurl_entity::group::{CreateGroup, Group, GroupMember, NewMember, UpdateGroup};
use saveurl_entity::link::{CreateLink, Link, PublicLink, UpdateLink};
use saveurl_entity::user::{CreateUser, User};
use saveurl_entity::vocabulary::{CustomEntry, VocabularyKind};

use crate::store::{
    DUPLICATE_EMAIL, DUPLICATE_GROUP_NAME, DUPLICATE_MEMBER, GroupStore, LinkStore, UserStore,
    VocabularyStore,
};

#[derive(Debug, Clone)]
struct MemberRow {
    id: MemberId,
    group_id: GroupId,
    user_id: UserId,
    email: String,
    joined_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    links: BTreeMap<LinkId, Link>,
    groups: BTreeMap<GroupId, Group>,
    members: BTreeMap<MemberId, MemberRow>,
    custom: BTreeMap<CustomEntryId, (VocabularyKind, CustomEntry)>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn member_view(&self, row: &MemberRow) -> GroupMember {
        GroupMember {
            id: row.id,
            group_id: row.group_id,
            user_id: row.user_id,
            email: row.email.clone(),
            name: self
                .users
                .get(&row.user_id)
                .map(|u| u.name.clone())
                .unwrap_or_default(),
            joined_at: row.joined_at,
        }
    }

    fn delete_group(&mut self, id: GroupId) -> bool {
        if self.groups.remove(&id).is_none() {
            return false;
        }
        self.members.retain(|_, m| m.group_id != id);
        self.links.retain(|_, l| l.group_id != Some(id));
        true
    }

    fn delete_user(&mut self, id: UserId) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        let owned: Vec<GroupId> = self
            .groups
            .values()
            .filter(|g| g.owner_id == id)
            .map(|g| g.id)
            .collect();
        for group_id in owned {
            self.delete_group(group_id);
        }
        self.links.retain(|_, l| l.user_id != id);
        self.members.retain(|_, m| m.user_id != id);
        self.custom.retain(|_, (_, e)| e.user_id != id);
        true
    }

    fn user_mut(&mut self, id: UserId) -> AppResult<&mut User> {
        self.users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Store holding every table in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let email = data.email.to_lowercase();
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == email) {
            return Err(AppError::conflict(DUPLICATE_EMAIL));
        }
        let now = Utc::now();
        let user = User {
            id: UserId(tables.next_id()),
            name: data.name.clone(),
            email,
            password_hash: data.password_hash.clone(),
            is_verified: false,
            verification_code: Some(data.verification_code.clone()),
            verification_code_expiry: Some(data.verification_code_expiry),
            reset_password_code: None,
            reset_password_code_expiry: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        Ok(self.tables.write().await.delete_user(id))
    }

    async fn set_verification_code(
        &self,
        id: UserId,
        code: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.verification_code = Some(code.to_string());
        user.verification_code_expiry = Some(expiry);
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn mark_verified(&self, id: UserId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.is_verified = true;
        user.verification_code = None;
        user.verification_code_expiry = None;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_reset_code(
        &self,
        id: UserId,
        code: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.reset_password_code = Some(code.to_string());
        user.reset_password_code_expiry = Some(expiry);
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn reset_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.password_hash = password_hash.to_string();
        user.reset_password_code = None;
        user.reset_password_code_expiry = None;
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<Link>> {
        let tables = self.tables.read().await;
        let mut links: Vec<Link> = tables
            .links
            .values()
            .filter(|l| l.user_id == owner)
            .cloned()
            .collect();
        newest_first(&mut links, |l| (l.created_at, l.id.get()));
        Ok(links)
    }

    async fn list_public(&self) -> AppResult<Vec<PublicLink>> {
        use saveurl_entity::link::Visibility;

        let tables = self.tables.read().await;
        let mut links: Vec<PublicLink> = tables
            .links
            .values()
            .filter(|l| l.visibility == Visibility::Public)
            .filter_map(|l| {
                tables.users.get(&l.user_id).map(|u| PublicLink {
                    link: l.clone(),
                    user_name: u.name.clone(),
                    user_email: u.email.clone(),
                })
            })
            .collect();
        newest_first(&mut links, |p| (p.link.created_at, p.link.id.get()));
        Ok(links)
    }

    async fn list_by_group(&self, group_id: GroupId) -> AppResult<Vec<Link>> {
        let tables = self.tables.read().await;
        let mut links: Vec<Link> = tables
            .links
            .values()
            .filter(|l| l.group_id == Some(group_id))
            .cloned()
            .collect();
        newest_first(&mut links, |l| (l.created_at, l.id.get()));
        Ok(links)
    }

    async fn find_owned(&self, id: LinkId, owner: UserId) -> AppResult<Option<Link>> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .get(&id)
            .filter(|l| l.user_id == owner)
            .cloned())
    }

    async fn create(&self, data: &CreateLink) -> AppResult<Link> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&data.user_id) {
            return Err(AppError::database("links.user_id references a missing user"));
        }
        if let Some(group_id) = data.group_id {
            if !tables.groups.contains_key(&group_id) {
                return Err(AppError::database("links.group_id references a missing group"));
            }
        }
        let now = Utc::now();
        let link = Link {
            id: LinkId(tables.next_id()),
            user_id: data.user_id,
            url: data.url.clone(),
            title: data.title.clone(),
            source: data.source.clone(),
            category: data.category.clone(),
            tags: data.tags.clone(),
            description: data.description.clone(),
            visibility: data.visibility,
            group_id: data.group_id,
            created_at: now,
            updated_at: now,
        };
        tables.links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn update_owned(
        &self,
        id: LinkId,
        owner: UserId,
        data: &UpdateLink,
    ) -> AppResult<Option<Link>> {
        let mut tables = self.tables.write().await;
        match tables.links.get_mut(&id) {
            Some(link) if link.user_id == owner => {
                data.apply(link, Utc::now());
                Ok(Some(link.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, id: LinkId, owner: UserId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.links.get(&id).is_some_and(|l| l.user_id == owner) {
            tables.links.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn count_by_group(&self, group_id: GroupId) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .values()
            .filter(|l| l.group_id == Some(group_id))
            .count() as i64)
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: UserId, email: &str) -> AppResult<Vec<Group>> {
        let email = email.to_lowercase();
        let tables = self.tables.read().await;
        let mut groups: Vec<Group> = tables
            .groups
            .values()
            .filter(|g| {
                g.owner_id == user_id
                    || tables
                        .members
                        .values()
                        .any(|m| m.group_id == g.id && m.email == email)
            })
            .cloned()
            .collect();
        newest_first(&mut groups, |g| (g.created_at, g.id.get()));
        Ok(groups)
    }

    async fn create(&self, data: &CreateGroup) -> AppResult<Group> {
        let mut tables = self.tables.write().await;
        if tables
            .groups
            .values()
            .any(|g| g.owner_id == data.owner_id && g.name == data.name)
        {
            return Err(AppError::duplicate(DUPLICATE_GROUP_NAME));
        }
        let now = Utc::now();
        let group = Group {
            id: GroupId(tables.next_id()),
            owner_id: data.owner_id,
            name: data.name.clone(),
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn update(&self, id: GroupId, data: &UpdateGroup) -> AppResult<Option<Group>> {
        let mut tables = self.tables.write().await;
        let Some(owner_id) = tables.groups.get(&id).map(|g| g.owner_id) else {
            return Ok(None);
        };
        if tables
            .groups
            .values()
            .any(|g| g.id != id && g.owner_id == owner_id && g.name == data.name)
        {
            return Err(AppError::duplicate(DUPLICATE_GROUP_NAME));
        }
        let group = tables.groups.get_mut(&id).map(|g| {
            g.name = data.name.clone();
            g.description = data.description.clone();
            g.updated_at = Utc::now();
            g.clone()
        });
        Ok(group)
    }

    async fn delete(&self, id: GroupId) -> AppResult<bool> {
        Ok(self.tables.write().await.delete_group(id))
    }

    async fn list_members(&self, group_id: GroupId) -> AppResult<Vec<GroupMember>> {
        let tables = self.tables.read().await;
        let mut members: Vec<GroupMember> = tables
            .members
            .values()
            .filter(|m| m.group_id == group_id)
            .map(|m| tables.member_view(m))
            .collect();
        members.sort_by_key(|m| (m.joined_at, m.id));
        Ok(members)
    }

    async fn find_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> AppResult<Option<GroupMember>> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .get(&member_id)
            .filter(|m| m.group_id == group_id)
            .map(|m| tables.member_view(m)))
    }

    async fn is_member(&self, group_id: GroupId, email: &str) -> AppResult<bool> {
        let email = email.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .any(|m| m.group_id == group_id && m.email == email))
    }

    async fn count_members(&self, group_id: GroupId) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .filter(|m| m.group_id == group_id)
            .count() as i64)
    }

    async fn add_member(
        &self,
        data: &NewMember,
        capacity: i64,
    ) -> AppResult<Option<GroupMember>> {
        let email = data.email.to_lowercase();
        let mut tables = self.tables.write().await;
        if !tables.groups.contains_key(&data.group_id) || !tables.users.contains_key(&data.user_id)
        {
            return Err(AppError::database(
                "group_members references a missing group or user",
            ));
        }
        let existing = tables
            .members
            .values()
            .filter(|m| m.group_id == data.group_id)
            .collect::<Vec<_>>();
        if existing.iter().any(|m| m.email == email) {
            return Err(AppError::duplicate(DUPLICATE_MEMBER));
        }
        if existing.len() as i64 >= capacity {
            return Ok(None);
        }
        let row = MemberRow {
            id: MemberId(tables.next_id()),
            group_id: data.group_id,
            user_id: data.user_id,
            email,
            joined_at: Utc::now(),
        };
        let view = tables.member_view(&row);
        tables.members.insert(row.id, row);
        Ok(Some(view))
    }

    async fn remove_member(&self, group_id: GroupId, member_id: MemberId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables
            .members
            .get(&member_id)
            .is_some_and(|m| m.group_id == group_id)
        {
            tables.members.remove(&member_id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl VocabularyStore for MemoryStore {
    async fn list_custom(
        &self,
        user_id: UserId,
        kind: VocabularyKind,
    ) -> AppResult<Vec<CustomEntry>> {
        let tables = self.tables.read().await;
        Ok(tables
            .custom
            .values()
            .filter(|(k, e)| *k == kind && e.user_id == user_id)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn insert_custom(
        &self,
        user_id: UserId,
        kind: VocabularyKind,
        name: &str,
    ) -> AppResult<Option<CustomEntry>> {
        let name = name.to_lowercase();
        let mut tables = self.tables.write().await;
        if tables
            .custom
            .values()
            .any(|(k, e)| *k == kind && e.user_id == user_id && e.name == name)
        {
            return Ok(None);
        }
        let entry = CustomEntry {
            id: CustomEntryId(tables.next_id()),
            user_id,
            name,
            created_at: Utc::now(),
        };
        tables.custom.insert(entry.id, (kind, entry.clone()));
        Ok(Some(entry))
    }
}
