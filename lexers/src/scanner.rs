#![deny(warnings)]

/// Buffered lookahead over any iterator. Items are consumed into a pending
/// lexeme until `extract` hands them out and starts a new one.
pub struct Scanner<I: Iterator> where I::Item: Clone {
    src: I,
    buf: Vec<I::Item>,
    pos: usize, // items of buf that belong to the current lexeme
}

impl<I> Iterator for Scanner<I> where I: Iterator, I::Item: Clone {
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        if !self.fill(self.pos + 1) {
            return None;
        }
        self.pos += 1;
        self.curr()
    }
}

impl<I> Scanner<I> where I: Iterator, I::Item: Clone {
    pub fn new(source: I) -> Scanner<I> {
        Scanner{src: source, buf: Vec::new(), pos: 0}
    }

    // pull from the source until at least n items are buffered
    fn fill(&mut self, n: usize) -> bool {
        while self.buf.len() < n {
            match self.src.next() {
                Some(item) => self.buf.push(item),
                None => return false,
            }
        }
        true
    }

    /// Last item consumed into the current lexeme.
    pub fn curr(&self) -> Option<I::Item> {
        self.view().last().cloned()
    }

    pub fn peek(&mut self) -> Option<I::Item> {
        if !self.fill(self.pos + 1) {
            return None;
        }
        Some(self.buf[self.pos].clone())
    }

    pub fn view(&self) -> &[I::Item] {
        &self.buf[..self.pos]
    }

    pub fn extract(&mut self) -> Vec<I::Item> {
        let lexeme = self.buf.drain(..self.pos).collect();
        self.pos = 0;
        lexeme
    }
}

impl<I> Scanner<I> where I: Iterator, I::Item: Clone + PartialEq {
    // Advance only if the next item is in the 'any' set
    pub fn accept_any(&mut self, any: &[I::Item]) -> Option<I::Item> {
        match self.peek() {
            Some(next) if any.contains(&next) => self.next(),
            _ => None,
        }
    }

    // Consume a run of items from the 'over' set, true if anything was taken
    pub fn skip_all(&mut self, over: &[I::Item]) -> bool {
        let mut advanced = false;
        while self.accept_any(over).is_some() { advanced = true; }
        advanced
    }
}

impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }
}
