use crate::{
    model::book::{BookCatalogDto, CatalogChapterDto},
    server::model::chapter::{Book, Chapter},
};

#[derive(Debug, Clone)]
pub struct CatalogChapter {
    pub chapter: Chapter,
    pub is_purchased: bool,
}

/// A book's chapter listing annotated with the caller's ownership.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    pub book: Book,
    pub chapters: Vec<CatalogChapter>,
}

impl BookCatalog {
    pub fn free_count(&self) -> u64 {
        self.chapters.iter().filter(|c| c.chapter.is_free).count() as u64
    }

    pub fn paid_count(&self) -> u64 {
        self.chapters.iter().filter(|c| c.chapter.is_paid()).count() as u64
    }

    pub fn vip_count(&self) -> u64 {
        self.chapters.iter().filter(|c| c.chapter.is_vip).count() as u64
    }

    pub fn into_dto(self) -> BookCatalogDto {
        let free_count = self.free_count();
        let paid_count = self.paid_count();
        let vip_count = self.vip_count();

        BookCatalogDto {
            book_id: self.book.id,
            title: self.book.title,
            author: self.book.author,
            rating: self.book.rating.map(|r| r.to_string()),
            chapters: self
                .chapters
                .into_iter()
                .map(|c| CatalogChapterDto {
                    id: c.chapter.id,
                    chapter_num: c.chapter.chapter_num,
                    title: c.chapter.title,
                    word_count: c.chapter.word_count,
                    is_free: c.chapter.is_free,
                    is_vip: c.chapter.is_vip,
                    price: c.chapter.price.cents(),
                    is_purchased: c.is_purchased,
                })
                .collect(),
            free_count,
            paid_count,
            vip_count,
        }
    }
}
